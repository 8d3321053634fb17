use clap::{Parser, Subcommand};
use hound::WavSpec;
use log::debug;
use releasetone_core::{FrameOutcome, FskModulator, Receiver, ReceiverConfig, Sample};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "releasetone")]
#[command(about = "Acoustic FSK release-trigger receiver and test-signal generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a release transmission to a WAV file
    Encode {
        /// Output WAV file
        #[arg(value_name = "OUTPUT.WAV")]
        output: PathBuf,

        /// Release code as hex bytes (e.g. AAAA)
        #[arg(short, long, default_value = "AAAA")]
        code: String,
    },

    /// Replay a WAV capture through the receiver and report frame outcomes
    Decode {
        /// Input WAV file
        #[arg(value_name = "INPUT.WAV")]
        input: PathBuf,

        /// Expected release code as hex bytes (e.g. AAAA)
        #[arg(short, long, default_value = "AAAA")]
        code: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { output, code } => encode_command(&output, &code)?,
        Commands::Decode { input, code } => decode_command(&input, &code)?,
    }

    Ok(())
}

fn parse_code(hex: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let cleaned: String = hex.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() || cleaned.len() % 2 != 0 {
        return Err(format!("code must be an even number of hex digits: {hex:?}").into());
    }
    let mut bytes = Vec::with_capacity(cleaned.len() / 2);
    for chunk in cleaned.as_bytes().chunks(2) {
        let pair = std::str::from_utf8(chunk)?;
        bytes.push(u8::from_str_radix(pair, 16)?);
    }
    Ok(bytes)
}

fn config_for(code: &str) -> Result<ReceiverConfig, Box<dyn std::error::Error>> {
    let config = ReceiverConfig {
        release_code: parse_code(code)?,
        ..ReceiverConfig::default()
    };
    config.validate()?;
    Ok(config)
}

fn encode_command(output_path: &PathBuf, code: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_for(code)?;
    let samples = FskModulator::new(&config).modulate(&config.release_code);
    println!(
        "Synthesized {} samples for code {:02X?}",
        samples.len(),
        config.release_code
    );

    let spec = WavSpec {
        channels: 1,
        sample_rate: config.sample_rate_hz as u32,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let file = File::create(output_path)?;
    let mut writer = hound::WavWriter::new(file, spec)?;
    for sample in samples {
        writer.write_sample(adc_to_i16(sample))?;
    }
    writer.finalize()?;

    println!("Wrote {}", output_path.display());
    Ok(())
}

fn decode_command(input_path: &PathBuf, code: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_for(code)?;

    let mut reader = hound::WavReader::open(input_path)?;
    let spec = reader.spec();
    debug!("wav spec: {spec:?}");
    if spec.channels != 1 || spec.bits_per_sample != 16 {
        return Err("expected mono 16-bit PCM capture".into());
    }

    let samples: Vec<Sample> = reader
        .samples::<i16>()
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(i16_to_adc)
        .collect();
    println!(
        "Read {} samples from {}",
        samples.len(),
        input_path.display()
    );

    let mut receiver = Receiver::new(&config)?;
    let outcomes = receiver.process_buffer(&samples);

    let mut accepts = 0;
    for outcome in &outcomes {
        match outcome {
            FrameOutcome::Accept => {
                accepts += 1;
                println!("frame accepted: release code matched");
            }
            FrameOutcome::Reject => println!("frame rejected: code mismatch"),
            FrameOutcome::Overflow => println!("frame overflow: decoder reset"),
        }
    }

    if accepts == 0 {
        return Err("no release frame accepted".into());
    }
    println!("{accepts} release frame(s) accepted");
    Ok(())
}

/// Map an unsigned ADC-domain sample (mid-scale 128) to signed 16-bit PCM.
fn adc_to_i16(sample: Sample) -> i16 {
    ((sample as i32 - 128) * 256).clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// Map signed 16-bit PCM back into the unsigned ADC domain.
fn i16_to_adc(sample: i16) -> Sample {
    ((sample as i32 / 256) + 128).clamp(0, 255) as Sample
}
