use altiroute::{config::Config, provider::ElevationProvider};
use clap::Parser;
use shared::Coordinate;

#[derive(Debug, Parser)]
#[command(about = "Query the configured elevation source for a few coordinates")]
struct Args {
    #[command(flatten)]
    config: Config,

    /// Coordinates as `lat,lng`, may be repeated
    #[arg(long = "at", value_parser = parse_coordinate, required = true)]
    points: Vec<Coordinate>,
}

fn parse_coordinate(raw: &str) -> Result<Coordinate, String> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected `lat,lng`, got `{raw}`"))?;
    let lat = lat.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let lng = lng.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok(Coordinate::new(lat, lng))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let source = args.config.elevation()?;

    println!("Fetching elevations for {} coordinates:", args.points.len());
    let elevations = source.get_elevations(&args.points).await?;
    for (point, elevation) in args.points.iter().zip(&elevations) {
        println!("  ({:.5}, {:.5}): {:.1} m", point.lat, point.lng, elevation);
    }

    Ok(())
}
