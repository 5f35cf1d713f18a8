use clap::{Arg, ArgAction, Command, value_parser};
use gtranslate::{
    BatchOptions, ClientConfig, MtResult, ReqwestTransport, TranslationResult, Translator,
    TranslatorConfig,
};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("gtranslate")
        .version("0.1.0")
        .about("Translate text with the Google Translate web endpoint")
        .arg(
            Arg::new("target-locale")
                .help("Target language code (e.g., pt, es, zh-CN)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("text")
                .help("Text to translate; read from stdin when omitted")
                .num_args(0..)
                .index(2),
        )
        .arg(
            Arg::new("source-locale")
                .long("source")
                .short('s')
                .help("Source language code (default: auto-detect)"),
        )
        .arg(
            Arg::new("batch")
                .long("batch")
                .short('b')
                .help("Translate each TEXT (or each stdin line) as a separate item")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("batch-size")
                .long("batch-size")
                .help("Items per request in batch mode")
                .value_parser(value_parser!(usize))
                .default_value("50"),
        )
        .arg(
            Arg::new("delimiter")
                .long("delimiter")
                .help("Separator used to join items within one request")
                .default_value(BatchOptions::DEFAULT_DELIMITER),
        )
        .arg(
            Arg::new("delay")
                .long("delay")
                .help("Pause between batch requests in milliseconds")
                .value_parser(value_parser!(u64))
                .default_value("100"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print results as JSON records")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show debug logging")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let target_locale = matches
        .get_one::<String>("target-locale")
        .ok_or("missing target locale")?;
    let batch_mode = matches.get_flag("batch");
    let as_json = matches.get_flag("json");

    // Flags override GTRANSLATE_* environment defaults
    let mut config = TranslatorConfig::from_env()?.with_default_target_language(target_locale);
    if let Some(source) = matches.get_one::<String>("source-locale") {
        config = config.with_default_source_language(source);
    }
    debug!(from = %config.default_from, to = %config.default_to, "Resolved languages");

    let transport = ReqwestTransport::new(&ClientConfig::from_env()?)?;
    let translator = Translator::with_transport(transport, config);

    let args: Vec<String> = matches
        .get_many::<String>("text")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let texts = if args.is_empty() {
        read_stdin(batch_mode).await?
    } else if batch_mode {
        args
    } else {
        vec![args.join(" ")]
    };

    let outcome: MtResult<Vec<String>> = if batch_mode {
        let options = BatchOptions::default()
            .batch_size(*matches.get_one::<usize>("batch-size").unwrap_or(&50))
            .delimiter(
                matches
                    .get_one::<String>("delimiter")
                    .map(String::as_str)
                    .unwrap_or(BatchOptions::DEFAULT_DELIMITER),
            )
            .delay(Duration::from_millis(
                *matches.get_one::<u64>("delay").unwrap_or(&100),
            ));
        translator.translate_batch(&texts, None, None, Some(options)).await
    } else {
        let text = texts.into_iter().next().unwrap_or_default();
        translator.translate(&text, None, None).await.map(|t| vec![t])
    };

    if as_json {
        let records: Vec<TranslationResult> = match &outcome {
            Ok(items) => items
                .iter()
                .map(|item| TranslationResult::success(item.clone()))
                .collect(),
            Err(e) => vec![TranslationResult::failure(e)],
        };
        println!("{}", serde_json::to_string_pretty(&records)?);
    }

    match outcome {
        Ok(items) => {
            if !as_json {
                for item in items {
                    println!("{}", item);
                }
            }
            Ok(())
        }
        Err(e) => {
            if !as_json {
                eprintln!("❌ {}", e);
                if let Some(raw) = e.raw() {
                    eprintln!("   Response began with: {}", raw);
                }
            }
            Err(e.into())
        }
    }
}

/// Read the whole of stdin; batch mode takes one item per non-empty line
async fn read_stdin(batch_mode: bool) -> std::io::Result<Vec<String>> {
    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;

    if batch_mode {
        Ok(input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    } else {
        Ok(vec![input])
    }
}
