use clap::Parser;
use log::{info, warn};
use std::fmt::{Display, Formatter};
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Build a table, Encode, Decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Table,
    Encode,
    Decode,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Define the two output channels
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Build Huffman code tables, and encode and decode with them",
    long_about = "
    With no mode flag the input bytes are counted and a code table is written next to the
    input as <FILENAME>.codes. Encoding writes the input as bit text (one '0' or '1' per bit)
    to <FILENAME>.bits. Decoding reads bit text and writes the bytes to <FILENAME>.out.

    A code table is two lines per symbol: the symbol number, then its code."
)]
pub struct Args {
    /// Filename of file to process (standard input if none)
    #[clap()]
    filename: Option<String>,

    /// Encode the input into bit text with a code table
    #[clap(short = 'z', long = "encode", conflicts_with = "decode")]
    encode: bool,

    /// Decode bit text with a code table
    #[clap(short = 'd', long = "decode")]
    decode: bool,

    /// Code table to encode or decode with (default <FILENAME>.codes)
    #[clap(short = 't', long = "table")]
    table: Option<String>,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Refuse tables that are not prefix free, repeat a symbol, or have no end-of-stream
    #[clap(short = 's', long = "strict")]
    strict: bool,

    /// Break encoded bit text into lines of this many bits. 0 writes one line
    #[clap(short = 'w', long = "width", default_value_t = 0)]
    width: usize,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 3)]
    v: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffOpts {
    /// Build a table / Encode / Decode
    pub op_mode: Mode,
    /// Name of file to read for input
    pub file: Option<String>,
    /// Name of the code table given on the command line
    pub table: Option<String>,
    /// Location where output is sent
    pub output: Output,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Check code tables before decoding with them
    pub strict: bool,
    /// Bits per line of encoded output, 0 for no line breaks
    pub line_width: usize,
    /// Log level requested with -v
    pub verbose: log::LevelFilter,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            op_mode: Mode::Table,
            file: None,
            table: None,
            output: Output::File,
            force_overwrite: false,
            strict: false,
            line_width: 0,
            verbose: log::LevelFilter::Info,
        }
    }

    /// Copy command line settings from clap's structure into ours.
    pub fn from_args(args: Args) -> Self {
        let mut opts = HuffOpts::new();
        if args.encode {
            opts.op_mode = Mode::Encode
        };
        if args.decode {
            opts.op_mode = Mode::Decode
        };
        opts.file = args.filename;
        opts.table = args.table;
        // Without an input file there is no output name to derive, so fall back to stdout.
        if args.stdout || opts.file.is_none() {
            opts.output = Output::Stdout
        };
        opts.force_overwrite = args.force;
        opts.strict = args.strict;
        opts.line_width = args.width;
        opts.verbose = match args.v {
            0 => log::LevelFilter::Off,
            1 => log::LevelFilter::Error,
            2 => log::LevelFilter::Warn,
            3 => log::LevelFilter::Info,
            4 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        opts
    }

    /// The input name with a trailing ".bits" removed.
    fn stem(&self) -> Option<&str> {
        self.file
            .as_deref()
            .map(|f| f.strip_suffix(".bits").unwrap_or(f))
    }

    /// Code table to use: the one given, or one named after the input.
    pub fn table_name(&self) -> Option<String> {
        match (&self.table, self.op_mode) {
            (Some(table), _) => Some(table.clone()),
            (None, Mode::Table) => None,
            (None, _) => self.stem().map(|s| format!("{}.codes", s)),
        }
    }

    /// Output file name, or None when writing to stdout.
    pub fn output_name(&self) -> Option<String> {
        if self.output == Output::Stdout {
            return None;
        }
        match self.op_mode {
            Mode::Table => self.file.as_ref().map(|f| format!("{}.codes", f)),
            Mode::Encode => self.file.as_ref().map(|f| format!("{}.bits", f)),
            Mode::Decode => self.stem().map(|s| format!("{}.out", s)),
        }
    }

    /// Open the input file, or stdin.
    pub fn reader(&self) -> io::Result<Box<dyn Read>> {
        Ok(match &self.file {
            Some(name) => Box::new(BufReader::new(File::open(name)?)),
            None => Box::new(io::stdin()),
        })
    }

    /// Open the output file, or stdout. An existing file is only replaced with --force.
    pub fn writer(&self) -> io::Result<Box<dyn Write>> {
        match self.output_name() {
            Some(name) => {
                if !self.force_overwrite && Path::new(&name).exists() {
                    return Err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("{} already exists (use --force to overwrite)", name),
                    ));
                }
                let file = OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(&name)?;
                Ok(Box::new(BufWriter::new(file)))
            }
            None => Ok(Box::new(BufWriter::new(io::stdout()))),
        }
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the command line, set the log level and report the settings to the user.
pub fn huffopts_init() -> HuffOpts {
    let opts = HuffOpts::from_args(Args::parse());

    // Set the log level
    log::set_max_level(opts.verbose);

    // Below we report initialization status to the user
    info!("---- Huffcore Initialization Start ----",);
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    match &opts.file {
        Some(s) => info!("Getting input from the file {}", s),
        None => info!("Getting input from stdin"),
    }
    match opts.output_name() {
        Some(s) => info!("Sending output to {}", s),
        None => warn!("Sending output to stdout"),
    }
    if let Some(table) = opts.table_name() {
        info!("Using code table {}", table)
    };
    if opts.strict {
        info!("Checking code tables strictly")
    };
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    info!("---- Huffcore Initialization End ----\n");
    opts
}

#[cfg(test)]
mod test {
    use super::{Args, HuffOpts, Mode, Output};
    use clap::Parser;

    fn opts(args: &[&str]) -> HuffOpts {
        let mut argv = vec!["huffcore"];
        argv.extend_from_slice(args);
        HuffOpts::from_args(Args::try_parse_from(argv).unwrap())
    }

    #[test]
    fn defaults_test() {
        let o = opts(&["notes.txt"]);
        assert_eq!(o.op_mode, Mode::Table);
        assert_eq!(o.output, Output::File);
        assert_eq!(o.verbose, log::LevelFilter::Info);
        assert_eq!(o.output_name().as_deref(), Some("notes.txt.codes"));
        assert_eq!(o.table_name(), None);
    }

    #[test]
    fn encode_names_test() {
        let o = opts(&["-z", "notes.txt"]);
        assert_eq!(o.op_mode, Mode::Encode);
        assert_eq!(o.output_name().as_deref(), Some("notes.txt.bits"));
        assert_eq!(o.table_name().as_deref(), Some("notes.txt.codes"));
    }

    #[test]
    fn decode_names_test() {
        let o = opts(&["-d", "notes.txt.bits"]);
        assert_eq!(o.op_mode, Mode::Decode);
        assert_eq!(o.output_name().as_deref(), Some("notes.txt.out"));
        assert_eq!(o.table_name().as_deref(), Some("notes.txt.codes"));

        let o = opts(&["-d", "-t", "my.codes", "-c", "raw"]);
        assert_eq!(o.output_name(), None);
        assert_eq!(o.table_name().as_deref(), Some("my.codes"));
    }

    #[test]
    fn flags_test() {
        let o = opts(&["-s", "-f", "-w", "64", "-v", "5", "x"]);
        assert!(o.strict);
        assert!(o.force_overwrite);
        assert_eq!(o.line_width, 64);
        assert_eq!(o.verbose, log::LevelFilter::Trace);
        assert_eq!(opts(&["-v", "0", "x"]).verbose, log::LevelFilter::Off);
    }

    #[test]
    fn stdin_goes_to_stdout_test() {
        let o = opts(&["-d", "-t", "my.codes"]);
        assert_eq!(o.file, None);
        assert_eq!(o.output, Output::Stdout);
    }

    #[test]
    fn encode_and_decode_conflict_test() {
        assert!(Args::try_parse_from(["huffcore", "-z", "-d", "x"]).is_err());
    }
}
