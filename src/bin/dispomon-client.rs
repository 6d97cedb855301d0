use std::path::PathBuf;

use clap::Parser;

use dispomon::client::{
    aggregate::{composite, parse_service_list},
    RpcClient, CALL_TIMEOUT,
};
use dispomon::logging;

const RED: &str = "\x1b[1;31m";
const GREEN: &str = "\x1b[1;32m";
const YELLOW: &str = "\x1b[1;33m";
const BLUE: &str = "\x1b[1;34m";
const RESET: &str = "\x1b[m";

/// JSON-RPC disponibility aggregation client.
#[derive(Debug, Parser)]
#[command(name = "dispomon-client", version)]
struct Args {
    /// File with service URLs to consume.
    file: PathBuf,
    /// First date to query.
    start_date: String,
    /// Last date to query.
    end_date: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let args = Args::parse();
    let contents = std::fs::read_to_string(&args.file)?;
    let urls = parse_service_list(&contents)?;

    println!(
        "\nReading service URLs from {GREEN}{}{RESET}\n",
        args.file.display()
    );
    println!("Contacting services:");

    let mut client = RpcClient::new(CALL_TIMEOUT)?;
    let mut readings = Vec::new();
    for url in &urls {
        match client
            .get_disponibility(url, &args.start_date, &args.end_date)
            .await
        {
            Ok(reading) => {
                println!("Service: {BLUE}{url}{RESET}\t [{GREEN} OK {RESET}]");
                println!(
                    "\t{GREEN}Returned{RESET} {{Name: {YELLOW}{}{RESET}, Disponibility: {YELLOW}{}{RESET}}}",
                    reading.name, reading.disponibility
                );
                readings.push(reading);
            }
            Err(error) => {
                println!("Service: {BLUE}{url}{RESET}\t [{RED}FAIL{RESET}]");
                println!("\t{RED}{error}{RESET}");
            }
        }
    }

    let report = composite(&readings, urls.len());
    let count_color = if report.responded < report.total {
        RED
    } else {
        GREEN
    };
    println!(
        "\n{count_color}{}{RESET} out of {GREEN}{}{RESET} services responded.",
        report.responded, report.total
    );

    match report.disponibility {
        Some(value) => {
            let color = if value >= 0.95 { GREEN } else { BLUE };
            println!("The disponibility of the service is: {color}{value}{RESET}\n");
        }
        None => println!("{RED}Cannot calculate the disponibility of the service.{RESET}\n"),
    }

    Ok(())
}
