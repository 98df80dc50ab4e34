use argh::FromArgs;
use pixelfmt::{
    byteorder::LittleEndian,
    pipeline::{self, DimensionsSource, Outcome},
    Dimensions, FormatKind,
};
use std::{io::Write, str::FromStr};

mod io;

/// Converts between raw RGB565/RGB888/grayscale pixel buffers and binary
/// Netpbm images.
#[derive(FromArgs)]
struct Cli {
    /// the input file
    #[argh(positional)]
    input: String,
    /// the output file
    #[argh(positional)]
    output: String,
    /// input kind (16bit, 24bit, pbm, pgm, ppm)
    #[argh(positional)]
    input_kind: String,
    /// output kind (none, grayscale, rgb565, rgb888, pbm, pgm, ppm)
    #[argh(positional)]
    output_kind: String,
}

struct InputKind(FormatKind);

impl FromStr for InputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.to_ascii_lowercase().as_str() {
            "16bit" => FormatKind::Rgb565,
            "24bit" => FormatKind::Rgb888,
            "pbm" => FormatKind::Pbm,
            "pgm" => FormatKind::Pgm,
            "ppm" => FormatKind::Ppm,
            _ => {
                return Err(format!(
                    "wrong input kind '{s}' specified. Needs to be one of 16bit|24bit|pbm|pgm|ppm"
                ))
            }
        };
        Ok(InputKind(kind))
    }
}

/// Output kind, where `none` means "same as the input kind".
enum OutputKind {
    Same,
    Kind(FormatKind),
}

impl FromStr for OutputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.to_ascii_lowercase().as_str() {
            "none" => return Ok(OutputKind::Same),
            "grayscale" => FormatKind::Grayscale,
            "rgb565" => FormatKind::Rgb565,
            "rgb888" => FormatKind::Rgb888,
            "pbm" => FormatKind::Pbm,
            "pgm" => FormatKind::Pgm,
            "ppm" => FormatKind::Ppm,
            _ => {
                return Err(format!(
                    "wrong output kind '{s}' specified. Needs to be one of \
                     none|grayscale|rgb565|rgb888|pbm|pgm|ppm"
                ))
            }
        };
        Ok(OutputKind::Kind(kind))
    }
}

/// Asks the user for the image dimensions on stdin.
///
/// The raw pixel formats carry no width/height, so writing a Netpbm header
/// needs them from somewhere; this is the interactive source the converter
/// hands to the pipeline.
struct PromptedDimensions;

impl DimensionsSource for PromptedDimensions {
    fn dimensions(&mut self) -> Option<Dimensions> {
        let width = prompt_u32("Enter width: ")?;
        let height = prompt_u32("Enter height: ")?;
        (width > 0 && height > 0).then_some(Dimensions { width, height })
    }
}

fn prompt_u32(label: &str) -> Option<u32> {
    print!("{label}");
    std::io::stdout().flush().ok()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line).ok()?;
    line.trim().parse().ok()
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.first().map(String::as_str).unwrap_or("pixelfmt-cli");
    let rest: Vec<&str> = args.iter().skip(1).map(String::as_str).collect();

    let cli = match Cli::from_args(&[cmd], &rest) {
        Ok(cli) => cli,
        Err(early_exit) => {
            // Wrong argument count (or --help): usage on stdout, successful exit.
            println!("{}", early_exit.output);
            std::process::exit(0);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("[ERROR]: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let InputKind(input_kind) = cli.input_kind.parse()?;
    let output_kind = match cli.output_kind.parse()? {
        OutputKind::Same => input_kind,
        OutputKind::Kind(kind) => kind,
    };

    let data = io::read_file(&cli.input)?;

    let outcome = pipeline::convert::<LittleEndian>(
        &data,
        input_kind,
        output_kind,
        &mut PromptedDimensions,
    )?;

    match outcome {
        Outcome::Identity => {
            println!(
                "Output kind '{}' matches specified input kind '{}'. Nothing to do.",
                cli.output_kind, cli.input_kind
            );
        }
        Outcome::Converted(bytes) => {
            io::write_new_file(&cli.output, &bytes)?;
            println!(
                "Successfully wrote file '{}' of size '{}'",
                cli.output,
                bytes.len()
            );
        }
    }

    Ok(())
}
