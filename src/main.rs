//! # Struk CLI
//!
//! Command-line interface for printing sale receipts.
//!
//! ## Usage
//!
//! ```bash
//! # Print an order on a network printer
//! struk print order.json --transport network --descriptor 192.168.1.50
//!
//! # Use a printer settings file
//! struk print order.json --config printer.json
//!
//! # Reprint only the item rows
//! struk print order.json --compact
//!
//! # Show the ops without touching a printer
//! struk print order.json --dry-run
//!
//! # Show the formatted text layout
//! struk format order.json
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`
//! (e.g. `RUST_LOG=struk=debug`).

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use struk::{
    EscPosDriver, PrinterConfig, PrinterDriver, RecordingDriver, Sequencer, StrukError,
    layout::{LineItemFormatter, summary_line},
    receipt::{Order, Receipt},
    transport::Transport,
};

/// Struk - sale receipt printer utility
#[derive(Parser, Debug)]
#[command(name = "struk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print an order file as a receipt
    Print {
        /// Order JSON file
        order: PathBuf,

        /// Printer settings JSON file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Transport: cups, windows, network or file
        #[arg(long)]
        transport: Option<String>,

        /// Queue name, host, or output path (`-` for stdout)
        #[arg(long)]
        descriptor: Option<String>,

        /// Port for network printers
        #[arg(long)]
        port: Option<u16>,

        /// Fail on unknown transports instead of writing to stdout
        #[arg(long)]
        strict: bool,

        /// Print only the item rows, then cut
        #[arg(long)]
        compact: bool,

        /// Leave out the item rows
        #[arg(long)]
        no_items: bool,

        /// List the printer ops instead of printing
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the formatted item and summary rows
    Format {
        /// Order JSON file
        order: PathBuf,

        /// Printer settings JSON file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "struk=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), StrukError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Print {
            order,
            config,
            transport,
            descriptor,
            port,
            strict,
            compact,
            no_items,
            dry_run,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(kind) = transport {
                config.transport.kind = kind;
            }
            if let Some(descriptor) = descriptor {
                config.transport.descriptor = descriptor;
            }
            if let Some(port) = port {
                config.transport.port = port;
            }
            config.transport.strict |= strict;

            let mut receipt = Order::load(&order)?.into_receipt();
            let with_items = !no_items;

            if dry_run {
                let mut driver = RecordingDriver::new();
                let mut sequencer = Sequencer::new(config);
                sequencer.attach(&mut driver);
                print_with(&mut sequencer, &mut receipt, compact, with_items)?;
                drop(sequencer);
                for op in driver.program() {
                    println!("{:?}", op);
                }
                return Ok(());
            }

            let transport = config.transport.clone();
            let mut sequencer: Sequencer<EscPosDriver<Transport>> = Sequencer::new(config);
            sequencer.connect(&transport)?;
            print_with(&mut sequencer, &mut receipt, compact, with_items)?;
            eprintln!("Printed successfully!");
        }

        Commands::Format { order, config } => {
            let config = load_config(config.as_deref())?;
            let mut receipt = Order::load(&order)?.into_receipt();
            for line in format_lines(&config, &mut receipt) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<PrinterConfig, StrukError> {
    match path {
        Some(path) => PrinterConfig::load(path),
        None => Ok(PrinterConfig::default()),
    }
}

fn print_with<D: PrinterDriver>(
    sequencer: &mut Sequencer<D>,
    receipt: &mut Receipt,
    compact: bool,
    with_items: bool,
) -> Result<(), StrukError> {
    if compact {
        sequencer.print_receipt_v(receipt, with_items)
    } else {
        sequencer.print_receipt(receipt, with_items)
    }
}

/// Item rows followed by the summary rows, as they appear on paper.
fn format_lines(config: &PrinterConfig, receipt: &mut Receipt) -> Vec<String> {
    let fmt = config.number_format;
    let labels = &config.labels;
    let currency = receipt.currency().to_string();
    let discount = receipt.calculate_discount();

    let mut formatter = LineItemFormatter::new(config.item_column_width).number_format(fmt);
    if let Some(columns) = config.paper_columns {
        formatter = formatter.line_width(columns);
    }

    let mut lines: Vec<String> = receipt
        .items()
        .iter()
        .flat_map(|item| formatter.format(item))
        .collect();
    lines.push(String::new());
    lines.push(summary_line(&labels.subtotal, receipt.subtotal(), &currency, false, &fmt));
    lines.push(summary_line(&labels.discount, discount, &currency, false, &fmt));
    if receipt.tax() != 0 {
        lines.push(summary_line(&labels.tax, receipt.tax(), &currency, false, &fmt));
    }
    lines.push(summary_line(&labels.total, receipt.total(), &currency, true, &fmt));
    lines
}
