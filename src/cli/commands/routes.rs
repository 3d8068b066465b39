use crate::cli::OutputFormat;
use crate::handlers::route_table;

pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let routes = route_table();

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&routes)?),
        OutputFormat::Text => {
            for route in routes {
                println!(
                    "{:<7} {:<40} {:<12} {}",
                    route.method, route.path, route.requires, route.entity
                );
            }
        }
    }
    Ok(())
}
