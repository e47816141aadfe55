//! Command-line configuration for the OCR endpoint.

const DEFAULT_IP: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_PATH: &str = "/upload";

/// Where capture results are uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub ocr_url: String,
}

impl Config {
    /// Parse `-ip`/`-port`/`-path`/`-url` flags; `-url` overrides the trio.
    pub fn from_args<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut ip = DEFAULT_IP.to_string();
        let mut port = DEFAULT_PORT;
        let mut path = DEFAULT_PATH.to_string();
        let mut url = String::new();

        let mut iter = args.into_iter();
        while let Some(flag) = iter.next() {
            match flag.as_str() {
                "-ip" | "--ip" => ip = next_value(&mut iter, &flag)?,
                "-port" | "--port" => {
                    let raw = next_value(&mut iter, &flag)?;
                    port = raw.parse().map_err(|_| format!("invalid port: {raw}"))?;
                }
                "-path" | "--path" => path = next_value(&mut iter, &flag)?,
                "-url" | "--url" => url = next_value(&mut iter, &flag)?,
                other => return Err(format!("unknown flag: {other}")),
            }
        }

        let ocr_url = if url.is_empty() {
            format!("http://{ip}:{port}{path}")
        } else {
            url
        };
        Ok(Self { ocr_url })
    }
}

fn next_value<I>(iter: &mut I, flag: &str) -> Result<String, String>
where
    I: Iterator<Item = String>,
{
    iter.next().ok_or_else(|| format!("{flag} requires a value"))
}

pub fn print_usage() {
    eprintln!("textsnap - hotkey screen-region OCR");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -ip <addr>    OCR server address (default {DEFAULT_IP})");
    eprintln!("  -port <port>  OCR server port (default {DEFAULT_PORT})");
    eprintln!("  -path <path>  API path (default {DEFAULT_PATH})");
    eprintln!("  -url <url>    full API URL, overrides -ip/-port/-path");
}
