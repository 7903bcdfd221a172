//! Common output helpers shared across CLI commands.

use poitrack::Poi;
use serde_json::{Map, Value};

use crate::error::CliError;

/// Print event data as pretty JSON.
pub fn print_json(data: Map<String, Value>) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(&Value::Object(data))?);
    Ok(())
}

/// One-line summary of a POI.
pub fn describe_poi(poi: &Poi) -> String {
    let library = if poi.library().is_empty() {
        String::new()
    } else {
        format!(" [{}]", poi.library())
    };
    let within = if poi.contains_device() { " *" } else { "" };
    format!("{}{}{}", poi, library, within)
}

/// Print a titled list of POIs, or a placeholder when empty.
pub fn print_pois(title: &str, pois: &[Poi]) {
    println!("{} ({})", title, pois.len());
    if pois.is_empty() {
        println!("  (none)");
    }
    for poi in pois {
        println!("  {}", describe_poi(poi));
    }
}
