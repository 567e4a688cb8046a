use pdfext::{ExtensionConfig, StampError, StampOptions, stamp};
use std::env;

/// Environment variable naming an optional JSON configuration file.
const CONFIG_ENV: &str = "PDFEXT_CONFIG";

fn usage(program: &str) {
    eprintln!("Sets the default appearance of a PDF annotation and saves a copy.");
    eprintln!();
    eprintln!("Usage: {program} <input.pdf> <output.pdf> [options]");
    eprintln!("  --page N  --annot N  --font NAME  --size PT  --color R,G,B  --flags N");
    eprintln!();
    eprintln!("Without --annot a new FreeText annotation is created on the page.");
    eprintln!("Set {CONFIG_ENV} to a JSON file to override the library configuration.");
}

fn main() -> Result<(), StampError> {
    env_logger::init();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "pdfext".to_string());
    let options = match StampOptions::from_args(args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            usage(&program);
            std::process::exit(1);
        }
    };

    let config = match env::var_os(CONFIG_ENV) {
        Some(path) => ExtensionConfig::from_file(path)?,
        None => ExtensionConfig::default(),
    };
    log::debug!("using configuration {config:?}");
    pdfext::initialize(config)?;

    let report = pdfext::with_extension(|ext| Ok(stamp(ext, &options)))??;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
