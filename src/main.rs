use {
    huffpack::{compress_with, decompress_with, Dump, Error},
    std::{
        env, fs,
        io::{self, prelude::*},
        process,
    },
};

/// Extension carried by compressed files.
const SUFFIX: &str = ".huff";

enum Mode {
    Compress,
    Decompress,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let mut args = env::args();
    let _exe_name = args.next();

    let mode = match args.next().as_deref() {
        Some("compress") => Mode::Compress,
        Some("decompress") => Mode::Decompress,
        Some("-h") | Some("--help") => print_usage(0),
        _ => print_usage(1),
    };

    let mut dump = Dump::default();
    let mut paths: Vec<String> = Vec::new();
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => print_usage(0),
            "-dfreq" => dump.freq = true,
            "-dtree" => dump.tree = true,
            "-dcode" => dump.code = true,
            _ if arg.starts_with('-') && arg != "-" => {
                eprintln!("error: unknown option '{}'", arg);
                print_usage(1)
            }
            _ => paths.push(arg),
        }
    }
    if paths.len() > 2 {
        print_usage(1);
    }
    let input_path = paths.first().map(String::as_str).unwrap_or("-");
    let output_path = paths.get(1).map(String::as_str).unwrap_or("-");

    // The suffix convention only applies to real paths, not the stdio dash.
    if input_path != "-" {
        match mode {
            Mode::Compress if input_path.ends_with(SUFFIX) => {
                eprintln!(
                    "error: '{}' already carries the {} suffix; refusing to compress it again",
                    input_path, SUFFIX
                );
                process::exit(1);
            }
            Mode::Decompress if !input_path.ends_with(SUFFIX) => {
                eprintln!(
                    "error: '{}' lacks the {} suffix; refusing to decompress it",
                    input_path, SUFFIX
                );
                process::exit(1);
            }
            _ => {}
        }
    }

    let input = read_input(input_path)?;
    let output = match mode {
        Mode::Compress => compress_with(&input, dump)?,
        Mode::Decompress => decompress_with(&input, dump)?,
    };
    write_output(output_path, &output)?;
    Ok(())
}

fn read_input(path: &str) -> Result<Vec<u8>, Error> {
    if path == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read(path)?)
    }
}

fn write_output(path: &str, bytes: &[u8]) -> Result<(), Error> {
    if path == "-" {
        io::stdout().write_all(bytes)?;
    } else {
        fs::write(path, bytes)?;
    }
    Ok(())
}

fn print_usage(code: i32) -> ! {
    println!("Usage: huffpack <compress|decompress> [options] [input] [output]");
    println!("Compress or decompress a file with canonical Huffman coding.");
    println!();
    println!("Arguments:");
    println!("  input      Input file, or - for stdin (stdin if omitted)");
    println!("  output     Output file, or - for stdout (stdout if omitted)");
    println!();
    println!("Options:");
    println!("  -h, --help Display this help message");
    println!("  -dfreq     Print the frequency table to stderr");
    println!("  -dtree     Print the Huffman tree to stderr");
    println!("  -dcode     Print the code table to stderr");
    process::exit(code)
}
