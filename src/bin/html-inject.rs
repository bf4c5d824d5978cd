use nulltrace_html::{render_html, HtmlError, HtmlInjector, InjectorConfig};
use std::env;
use std::fs;
use std::process;
use tracing_subscriber::EnvFilter;

enum Output {
    Json,
    Html,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    let mut config_path: Option<String> = None;
    let mut output = Output::Json;
    let mut files = Vec::new();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => match iter.next() {
                Some(path) => config_path = Some(path),
                None => usage(),
            },
            "--html" => output = Output::Html,
            "-h" | "--help" => usage(),
            _ => files.push(arg),
        }
    }

    if files.is_empty() {
        usage();
    }

    let injector = match build_injector(config_path.as_deref()) {
        Ok(injector) => injector,
        Err(e) => {
            eprintln!("✗ invalid config:");
            eprintln!("  {}", e);
            process::exit(1);
        }
    };

    let mut exit_code = 0;

    for file_path in files {
        match convert_file(&injector, &file_path, &output) {
            Ok(Some(rendered)) => println!("{}", rendered),
            Ok(None) => println!("∅ {} has no content", file_path),
            Err(e) => {
                eprintln!("✗ {}:", file_path);
                eprintln!("  {}", e);
                exit_code = 1;
            }
        }
    }

    process::exit(exit_code);
}

fn usage() -> ! {
    eprintln!("Usage: html-inject [--config <injector.yaml>] [--html] <file.html>...");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  html-inject page.html");
    eprintln!("  html-inject --html --config injector.yaml *.html");
    eprintln!();
    eprintln!("Set RUST_LOG=nulltrace_html=debug to trace conversions.");
    process::exit(1);
}

fn build_injector(config_path: Option<&str>) -> Result<HtmlInjector, HtmlError> {
    let config = match config_path {
        Some(path) => InjectorConfig::from_yaml_file(path)?,
        None => InjectorConfig::default(),
    };
    HtmlInjector::new(config)
}

fn convert_file(
    injector: &HtmlInjector,
    path: &str,
    output: &Output,
) -> Result<Option<String>, HtmlError> {
    let content = fs::read_to_string(path).map_err(|e| HtmlError::IoError {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    let Some(tree) = injector.convert(&content) else {
        return Ok(None);
    };

    let rendered = match output {
        Output::Json => serde_json::to_string_pretty(&tree)?,
        Output::Html => render_html(&tree),
    };
    Ok(Some(rendered))
}
