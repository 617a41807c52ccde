use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use env_logger::Builder;
use log::{info, warn};

use decoy_core::io;
use decoy_core::model::assignment::AssignmentTable;
use decoy_core::model::composition::Composition;
use decoy_core::model::config::{DecoyConfig, DEFAULT_ALPHABET, DEFAULT_SENTINEL};
use decoy_core::model::context::pad;
use decoy_core::model::database::{ProteinDatabase, SequenceMap};
use decoy_core::model::de_bruijn_decoy::DeBruijnDecoy;
use decoy_core::model::digest::Digest;
use decoy_core::model::generator::{DecoyGenerator, DecoyStrategy, StrategyKind};

/// Decimal places of the proportion reports.
const PROPORTION_DECIMALS: u32 = 6;

/// Generate a concatenated target/decoy protein database.
#[derive(Debug, Parser)]
#[command(name = "decoy-gen")]
#[command(author, version, about)]
struct Cli {
    /// Target proteins (FASTA)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Decoy strategy: random, debruijn or reverse
    #[arg(short, long, default_value = "debruijn")]
    strategy: StrategyKind,

    /// Concatenated target/decoy database to write
    #[arg(short, long)]
    output: PathBuf,

    /// Also write the decoys alone to this FASTA file
    #[arg(long)]
    decoys: Option<PathBuf>,

    /// Write CSV reports (counts, proportions, tables) into this directory
    #[arg(long)]
    report_dir: Option<PathBuf>,

    /// Cleavage-defining residues kept in place by the debruijn strategy
    #[arg(long, default_value = "KR")]
    cleavage: String,

    /// Residue alphabet (defaults to A-Z)
    #[arg(long)]
    alphabet: Option<String>,

    /// Assignment table (debruijn only): reused if the file exists,
    /// otherwise written after generation. Without a value, the output
    /// path with a `.bin` extension is used
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    assignment: Option<Option<PathBuf>>,

    /// Verbosity (-v = info, -vv = debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn build_config(cli: &Cli) -> Result<DecoyConfig> {
    let alphabet: Vec<char> = match &cli.alphabet {
        Some(alphabet) => alphabet.chars().collect(),
        None => DEFAULT_ALPHABET.collect(),
    };
    Ok(DecoyConfig::new(alphabet, cli.cleavage.chars(), DEFAULT_SENTINEL)?)
}

fn assignment_path(cli: &Cli) -> Result<Option<PathBuf>> {
    Ok(match &cli.assignment {
        Some(Some(path)) => Some(path.clone()),
        Some(None) => Some(io::build_output_path(&cli.output, "bin")?),
        None => None,
    })
}

/// Builds the selected strategy, adopting a saved assignment table if one exists.
fn build_generator<'a>(
    cli: &Cli,
    assignment: Option<&Path>,
    targets: &'a ProteinDatabase,
    config: &DecoyConfig,
) -> Result<DecoyGenerator<'a>> {
    if cli.strategy == StrategyKind::DeBruijn {
        if let Some(path) = assignment.filter(|p| p.exists()) {
            let table = AssignmentTable::load(path)
                .with_context(|| format!("loading assignment table {}", path.display()))?;
            let decoy = DeBruijnDecoy::with_assignment(targets, config, table)
                .with_context(|| format!("adopting assignment table {}", path.display()))?;
            return Ok(DecoyGenerator::DeBruijn(decoy));
        }
    } else if assignment.is_some() {
        warn!("--assignment is only used by the debruijn strategy");
    }
    Ok(DecoyGenerator::new(cli.strategy, targets, config, &mut rand::rng())?)
}

/// Writes composition, digestion and (for debruijn) table reports, named
/// `<input stem>_<strategy>_<report>.csv`.
fn write_reports(
    dir: &Path,
    input: &Path,
    generator: &DecoyGenerator,
    decoys: &SequenceMap,
    config: &DecoyConfig,
) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let prefix = format!("{}_{}", io::file_stem(input)?, generator.kind().name());
    let report = |name: &str| dir.join(format!("{}_{}.csv", prefix, name));
    let targets = generator.targets();

    for (side, sequences) in [("target", targets.sequences()), ("decoy", decoys)] {
        let counts = Composition::count(sequences, config.alphabet())?;
        io::write_csv(report(&format!("{}_amino_acid_count", side)), counts.iter())?;
        let proportions = counts.proportions(PROPORTION_DECIMALS)?;
        let rows = proportions
            .values
            .iter()
            .map(|(symbol, value)| (symbol.to_string(), *value))
            .chain(std::iter::once(("Total".to_owned(), proportions.total)));
        io::write_csv(report(&format!("{}_amino_acid_proportion", side)), rows)?;

        let digest = Digest::new(sequences, config);
        io::write_csv(report(&format!("{}_peptides", side)), digest.iter())?;
        io::write_csv(report(&format!("{}_peptide_length", side)), digest.length_counts())?;
        io::write_csv(report(&format!("{}_peptide_mass", side)), digest.mass_counts().counts)?;
    }

    if let DecoyGenerator::DeBruijn(de_bruijn) = generator {
        let padded = targets.sequences().iter().map(|(id, seq)| (id.clone(), pad(seq, config.sentinel())));
        io::write_csv(report("padded_sequence"), padded)?;
        io::write_csv(report("combination_count"), de_bruijn.context_table().sorted())?;
        io::write_csv(report("combination_map"), de_bruijn.assignment().sorted())?;
    }

    info!("Reports written to {}", dir.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = build_config(&cli)?;
    let targets = io::read_fasta(&cli.input)
        .with_context(|| format!("reading targets from {}", cli.input.display()))?;

    let assignment = assignment_path(&cli)?;
    let generator = build_generator(&cli, assignment.as_deref(), &targets, &config)?;
    let decoys = generator.generate_decoy_dict(&mut rand::rng())?;

    if let DecoyGenerator::DeBruijn(de_bruijn) = &generator {
        if !de_bruijn.verify(&decoys)? {
            bail!("generated decoys do not match the assignment table");
        }
        if let Some(path) = assignment.as_deref().filter(|p| !p.exists()) {
            de_bruijn.assignment().save(path)
                .with_context(|| format!("saving assignment table {}", path.display()))?;
        }
    }

    let decoy_headers = targets.decoy_headers(&config.decoy_prefix);
    io::write_database(&cli.output, &targets, &decoys, &decoy_headers)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    if let Some(path) = &cli.decoys {
        io::write_fasta(path, &decoys, &decoy_headers)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(dir) = &cli.report_dir {
        write_reports(dir, &cli.input, &generator, &decoys, &config)?;
    }

    println!("{} {} decoys written to {}", decoys.len(), generator.kind(), cli.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_without_default_cleavage() {
        let cli = Cli::parse_from(["decoy-gen", "in.fasta", "-o", "out.fasta", "--alphabet", "ACDE", "--cleavage", "C"]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.alphabet(), &['A', 'C', 'D', 'E']);
        assert_eq!(config.cleavage(), &['C']);

        let cli = Cli::parse_from(["decoy-gen", "in.fasta", "-o", "out.fasta", "--alphabet", "ACDE"]);
        assert!(build_config(&cli).is_err());
    }

    #[test]
    fn test_assignment_path() {
        let cli = Cli::parse_from(["decoy-gen", "in.fasta", "-o", "out/concat.fasta"]);
        assert_eq!(assignment_path(&cli).unwrap(), None);

        let cli = Cli::parse_from(["decoy-gen", "in.fasta", "-o", "out/concat.fasta", "--assignment"]);
        assert_eq!(assignment_path(&cli).unwrap(), Some(PathBuf::from("out/concat.bin")));

        let cli = Cli::parse_from(["decoy-gen", "in.fasta", "-o", "out/concat.fasta", "--assignment", "table.bin"]);
        assert_eq!(assignment_path(&cli).unwrap(), Some(PathBuf::from("table.bin")));
    }
}
