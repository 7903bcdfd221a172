//! Nearby command - query POIs around a location and merge them.

use poitrack::config::ConfigFile;
use poitrack::query::{NearbyPlacesResult, NearbyPois, NearbyQuery, QueryError, QueryService};
use poitrack::MembershipState;

use super::common::{print_json, print_pois};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the nearby command.
#[derive(Debug, Clone, Copy)]
pub struct NearbyArgs {
    pub latitude: f64,
    pub longitude: f64,
    pub count: usize,
    pub json: bool,
}

/// Run the nearby command.
pub fn run(runner: &CliRunner, args: NearbyArgs) -> Result<(), CliError> {
    runner.log_startup("nearby");
    let service = runner.query_service()?;
    let mut state = runner.open_state()?;

    let result = execute(&mut state, &service, runner.config(), &args);
    let outcome = NearbyPlacesResult::from(result.clone());

    if args.json {
        print_json(outcome.to_event_data())?;
    } else if let Ok(pois) = &result {
        print_pois("Containing", &pois.containing);
        print_pois("Nearby", &pois.nearby);
        if let Some(current) = state.current_poi() {
            println!("Current: {}", current.identifier());
        }
    }

    result.map(|_| ()).map_err(CliError::from)
}

/// Query, then merge a successful response into the engine and remember
/// the query location. Failures leave the engine untouched.
pub fn execute(
    state: &mut MembershipState,
    service: &QueryService,
    config: &ConfigFile,
    args: &NearbyArgs,
) -> Result<NearbyPois, QueryError> {
    let places = config.places_config()?;
    state.apply_config(&places);

    let query = NearbyQuery::new(args.latitude, args.longitude).with_count(args.count);
    let pois = service.get_nearby_places(&query, &places).map_err(|e| {
        tracing::warn!(status = e.status().code(), error = %e, "Nearby query failed");
        e
    })?;

    state.process_nearby(&pois);
    state.save_last_known_location(args.latitude, args.longitude);
    Ok(pois)
}
