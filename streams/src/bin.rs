use std::path::PathBuf;

use anyhow::{ bail, Context, Result, };
use clap::{ Parser, Subcommand, };
use tracing::info;
use tracing_subscriber::EnvFilter;

use streams::{
	FileReadStream,
	FileWriteStream,
	MemoryWriteStream,
	ReadStream,
	Stream,
	StreamConfig,
	WriteStream,
};

const COPY_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Parser)]
#[command(about = "Byte stream utilities")]
struct Arguments {
	/// TOML file with stream settings
	#[arg(long, global = true)]
	config: Option<PathBuf>,

	/// Log debug output unless RUST_LOG says otherwise
	#[arg(long, short, global = true)]
	verbose: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Rewrite a text file with `\n` line endings
	Lines {
		input: PathBuf,
		/// Defaults to stdout
		#[arg(long, short)]
		output: Option<PathBuf>,
	},
	/// Copy a file byte for byte
	Copy {
		input: PathBuf,
		output: PathBuf,
	},
}

fn lines(config: &StreamConfig, input: PathBuf, output: Option<PathBuf>) -> Result<()> {
	let mut input_stream = FileReadStream::new(&input);
	if input_stream.bad() {
		bail!("Could not open {}", input.display());
	}

	let mut buffer = MemoryWriteStream::from_config(config);
	let mut count = 0;
	while let Some(line) = input_stream.read_line() {
		buffer.write(&line);
		buffer.write_u8(b'\n');
		count += 1;
	}

	if input_stream.bad() {
		bail!("Could not read {}", input.display());
	}

	if buffer.bad() {
		bail!("Ran out of memory buffering {}", input.display());
	}

	match output {
		Some(output) => {
			let mut output_stream = FileWriteStream::new(&output);
			output_stream.write(buffer.memory());
			if output_stream.bad() {
				bail!("Could not write {}", output.display());
			}
		},
		None => {
			std::io::Write::write_all(&mut std::io::stdout(), buffer.memory()).context("Could not write to stdout")?;
		},
	}

	info!("Normalized {} lines ({} bytes)", count, buffer.size());
	Ok(())
}

fn copy(input: PathBuf, output: PathBuf) -> Result<()> {
	let mut input_stream = FileReadStream::new(&input);
	if input_stream.bad() {
		bail!("Could not open {}", input.display());
	}

	let mut output_stream = FileWriteStream::new(&output);
	if output_stream.bad() {
		bail!("Could not open {}", output.display());
	}

	let mut chunk = vec![0u8; COPY_CHUNK_SIZE];
	while !input_stream.eof() {
		let length = input_stream.read(&mut chunk);
		output_stream.write(&chunk[..length]);

		if output_stream.bad() {
			bail!("Could not write {}", output.display());
		}
	}

	if input_stream.bad() {
		bail!("Could not read {}", input.display());
	}

	info!("Copied {} bytes", output_stream.tell());
	Ok(())
}

fn main() -> Result<()> {
	let arguments = Arguments::parse();

	// RUST_LOG takes precedence over --verbose
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(if arguments.verbose { "debug" } else { "info" }));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();

	let config = match &arguments.config {
		Some(path) => StreamConfig::read_file(path)
			.with_context(|| format!("Could not load configuration {}", path.display()))?,
		None => StreamConfig::default(),
	};

	match arguments.command {
		Command::Lines { input, output, } => lines(&config, input, output),
		Command::Copy { input, output, } => copy(input, output),
	}
}
