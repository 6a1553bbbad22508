use std::path::PathBuf;

use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;
use skycast_weather::Coordinates;

const ABOUT: &str = "Terminal weather dashboard";

const LONG_ABOUT: &str = "
Current conditions, air quality and a short forecast for any place, from the
Open-Meteo APIs (no API key required).

The last place shown is remembered, so subsequent runs of `skycast` start
there unless a place or coordinates are given.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles = STYLES, about = ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(help = "Place to search for (e.g. \"Paris\", \"San Francisco\")")]
    pub place: Option<String>,

    #[arg(
        long,
        requires = "lon",
        conflicts_with = "place",
        allow_hyphen_values = true,
        help = "Latitude of the place to show"
    )]
    pub lat: Option<f64>,

    #[arg(
        long,
        requires = "lat",
        allow_hyphen_values = true,
        help = "Longitude of the place to show"
    )]
    pub lon: Option<f64>,

    #[arg(short, long, help = "Keep prompting for places after the first one")]
    pub interactive: bool,

    #[arg(long, help = "Print the dashboard as JSON")]
    pub json: bool,

    #[arg(long, value_name = "DIR", help = "Directory holding config.toml and the session file")]
    pub config_dir: Option<PathBuf>,
}

impl Args {
    /// Coordinates given on the command line, checked for range
    pub fn coordinates(&self) -> anyhow::Result<Option<Coordinates>> {
        let (Some(lat), Some(lon)) = (self.lat, self.lon) else {
            return Ok(None);
        };
        if !(-90.0..=90.0).contains(&lat) {
            anyhow::bail!("Latitude {} is out of range (-90 to 90)", lat);
        }
        if !(-180.0..=180.0).contains(&lon) {
            anyhow::bail!("Longitude {} is out of range (-180 to 180)", lon);
        }
        Ok(Some(Coordinates::new(lat, lon)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_place() {
        let args = Args::try_parse_from(["skycast", "Paris"]).unwrap();
        assert_eq!(args.place.as_deref(), Some("Paris"));
        assert_eq!(args.coordinates().unwrap(), None);
    }

    #[test]
    fn test_parse_negative_coordinates() {
        let args = Args::try_parse_from(["skycast", "--lat", "-33.8688", "--lon", "151.2093"]).unwrap();
        assert_eq!(
            args.coordinates().unwrap(),
            Some(Coordinates::new(-33.8688, 151.2093))
        );
    }

    #[test]
    fn test_lat_requires_lon() {
        assert!(Args::try_parse_from(["skycast", "--lat", "10"]).is_err());
    }

    #[test]
    fn test_out_of_range_latitude() {
        let args = Args::try_parse_from(["skycast", "--lat", "91", "--lon", "0"]).unwrap();
        assert!(args.coordinates().is_err());
    }
}
