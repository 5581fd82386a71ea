//! Clip a saved HTML page from the command line.
//!
//! Usage: `clip_page [FILE] [--url URL] [--title TITLE] [--timeout SECS] [--offline] [--save]`
//!
//! Reads the page from FILE, or stdin when FILE is absent or `-`. The clip
//! goes to stdout, or with `--save` to `clip_<timestamp>.html` in the current
//! directory. `--offline` skips stylesheet downloads. Set `RUST_LOG` for logs.

use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::time::Duration;

use chrono::Utc;
use webclip::{
    capture_full_page, clip_file_name, CaptureMode, HttpFetcher, Options, Page, StaticFetcher,
};

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    save: bool,
    offline: bool,
    options: Options,
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut args = Args::default();
    let mut argv = env::args().skip(1);

    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--url" => args.options.page_url = Some(argv.next().ok_or("--url needs a value")?),
            "--title" => args.options.default_title = argv.next().ok_or("--title needs a value")?,
            "--timeout" => {
                let secs: u64 = argv.next().ok_or("--timeout needs a value")?.parse()?;
                args.options.fetch_timeout = Some(Duration::from_secs(secs));
            }
            "--offline" => args.offline = true,
            "--save" => args.save = true,
            "-" => args.input = None,
            flag if flag.starts_with("--") => return Err(format!("Unknown option: {flag}").into()),
            path => args.input = Some(path.to_string()),
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> io::Result<Vec<u8>> {
    match input {
        Some(path) => fs::read(path),
        None => {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes)?;
            Ok(bytes)
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = parse_args()?;
    let bytes = read_input(args.input.as_deref())?;
    let page = Page::from_bytes(&bytes, args.options.page_url.as_deref());
    log::info!("Clipping {page:?}");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let html = if args.offline {
        runtime.block_on(capture_full_page(&page, &StaticFetcher::new(), &args.options))?
    } else {
        let fetcher = HttpFetcher::from_options(&args.options)?;
        runtime.block_on(capture_full_page(&page, &fetcher, &args.options))?
    };

    if args.save {
        let file_name = clip_file_name(CaptureMode::Full, Utc::now());
        fs::write(&file_name, &html)?;
        eprintln!("Saved {file_name}");
    } else {
        io::stdout().write_all(html.as_bytes())?;
    }

    Ok(())
}
