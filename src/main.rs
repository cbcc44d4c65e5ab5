use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dlt645_rs::catalog::build_read_request;
use dlt645_rs::util::hex::{encode_hex_upper, format_hex_compact, parse_hex_lenient};
use dlt645_rs::{
    decode_frame, init_logger, log_info, DataIdent, IdentRegistry, MeterAddress, MeterResponse,
    ResponseInterpreter, StationInterpreter,
};

#[derive(Parser)]
#[command(name = "dlt645-cli")]
#[command(about = "CLI tool for DL/T 645-2007 frames")]
struct Cli {
    /// JSON identifier registry used to decode response values
    #[arg(long, global = true)]
    registry: Option<String>,

    /// Register the built-in table of common identifiers
    #[arg(long, global = true)]
    defaults: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a hex frame (spaces and wake-up bytes allowed)
    Decode { hex: String },
    /// Print the read request for an address and identifier (e.g. 02010100)
    Read {
        address: String,
        ident: String,
        #[arg(long)]
        wake_up: bool,
    },
}

fn load_registry(cli: &Cli) -> Result<IdentRegistry> {
    let registry = if cli.defaults {
        IdentRegistry::with_defaults()
    } else {
        IdentRegistry::new()
    };
    if let Some(path) = &cli.registry {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading registry {path}"))?;
        let count = registry
            .load_json(&json)
            .with_context(|| format!("loading registry {path}"))?;
        log_info(&format!("Loaded {count} identifiers from {path}"));
    }
    Ok(registry)
}

fn decode(hex: &str, registry: IdentRegistry) -> Result<()> {
    let bytes = parse_hex_lenient(hex)?;
    let frame = decode_frame(&bytes).context("decoding frame")?;
    let control = frame.control_word();

    println!("address:  {}", frame.address);
    println!(
        "control:  {:#04X} ({:?}, function {:#04X}, more={}, exception={})",
        frame.control,
        control.direction(),
        control.function_bits(),
        control.has_following_frame(),
        control.is_exception()
    );
    println!("data:     [{}]", format_hex_compact(&frame.data));

    match StationInterpreter::new().interpret_frame(&frame) {
        Ok(request) => println!("request:  {request:?}"),
        Err(rejection) => println!("request:  - ({})", rejection.error),
    }

    let responses = ResponseInterpreter::new(registry);
    match responses.interpret_frame(&frame) {
        Ok(MeterResponse::Read(resp)) => {
            println!("response: {} = {:?} {}", resp.ident(), resp.values(), resp.unit())
        }
        Ok(response) => println!("response: {response:?}"),
        Err(rejection) => println!("response: - ({})", rejection.error),
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logger();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Decode { hex } => {
            let registry = load_registry(&cli)?;
            decode(hex, registry)?;
        }
        Commands::Read {
            address,
            ident,
            wake_up,
        } => {
            let address = MeterAddress::parse(address)?;
            let ident = DataIdent::parse(ident)?;
            let prefix: &[u8] = if *wake_up {
                &dlt645_rs::constants::DLT645_WAKE_UP
            } else {
                &[]
            };
            let bytes = build_read_request(&address, ident, None, prefix)?;
            println!("{}", encode_hex_upper(&bytes));
        }
    }

    Ok(())
}
