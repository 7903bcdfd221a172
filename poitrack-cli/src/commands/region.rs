//! Region command - apply a geofence entry or exit.

use super::common::{describe_poi, print_json};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the region command.
pub fn run(runner: &CliRunner, region_id: &str, kind: &str, json: bool) -> Result<(), CliError> {
    runner.log_startup("region");
    let mut state = runner.open_state()?;

    match state.process_region_event(region_id, kind) {
        Some(transition) if json => print_json(transition.to_event_data())?,
        Some(transition) => {
            println!("{}: {}", transition.kind, describe_poi(&transition.poi));
            match state.current_poi() {
                Some(current) => println!("Current: {}", current.identifier()),
                None => println!("Current: (none)"),
            }
        }
        None => println!(
            "Ignored '{}' event for region '{}' (unknown event type or region not cached)",
            kind, region_id
        ),
    }
    Ok(())
}
