//! Membership state commands: snapshot, within, auth, location, reset.

use poitrack::state::AuthorizationStatus;
use poitrack::MembershipState;

use super::common::{print_json, print_pois};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Print the shared snapshot as JSON. Expired membership is cleared first.
pub fn snapshot(runner: &CliRunner) -> Result<(), CliError> {
    let mut state = runner.open_state()?;
    print_json(state.shared_snapshot().to_event_data())
}

/// List the cached POIs that contain the device.
pub fn within(runner: &CliRunner) -> Result<(), CliError> {
    let state = runner.open_state()?;
    print_pois("Containing", &state.pois_containing_device());
    Ok(())
}

/// Show the authorization status, or set it when `status` is given.
pub fn auth(runner: &CliRunner, status: Option<&str>) -> Result<(), CliError> {
    let mut state = runner.open_state()?;
    match status {
        Some(value) => {
            let applied = set_auth(&mut state, value);
            if applied.as_str() != value {
                println!(
                    "Unrecognized status '{}', stored '{}' instead",
                    value, applied
                );
            } else {
                println!("Authorization status: {}", applied);
            }
        }
        None => println!("Authorization status: {}", state.authorization_status()),
    }
    Ok(())
}

fn set_auth(state: &mut MembershipState, value: &str) -> AuthorizationStatus {
    state.set_authorization_status(Some(value));
    state.authorization_status()
}

/// Show the last known location.
pub fn location(runner: &CliRunner) -> Result<(), CliError> {
    let state = runner.open_state()?;
    match state.last_known_location() {
        Some(point) => println!("Last known location: {}", point),
        None => println!("Last known location: (none)"),
    }
    Ok(())
}

/// Clear every piece of membership state.
pub fn reset(runner: &CliRunner) -> Result<(), CliError> {
    runner.log_startup("reset");
    let mut state = runner.open_state()?;
    state.reset();
    println!("Membership state cleared");
    Ok(())
}
