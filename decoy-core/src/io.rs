use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::{InputError, Result};
use crate::model::database::{same_ids, ProteinDatabase, SequenceMap};

/// Residues per line in written FASTA files.
pub const FASTA_LINE_WIDTH: usize = 60;

/// Reads a FASTA file into a `ProteinDatabase`.
pub fn read_fasta<P: AsRef<Path>>(filename: P) -> Result<ProteinDatabase> {
	let database = parse_fasta(BufReader::new(File::open(&filename)?))?;
	info!("Read {} proteins from {}", database.len(), filename.as_ref().display());
	Ok(database)
}

/// Parses FASTA records.
///
/// - Header lines start with `>`; the whole line is kept as the header
/// - Sequence lines up to the next header are concatenated
/// - Blank lines are ignored
///
/// # Errors
/// Returns an error on sequence data before the first header, a header
/// without identifier, a duplicate identifier or a record without sequence.
pub fn parse_fasta<R: BufRead>(reader: R) -> Result<ProteinDatabase> {
	let mut sequences = SequenceMap::new();
	let mut headers = SequenceMap::new();
	let mut current: Option<(String, usize)> = None;

	for (index, line) in reader.lines().enumerate() {
		let line_number = index + 1;
		let line = line?;
		let line = line.trim();
		if line.is_empty() {
			continue;
		}

		if line.starts_with('>') {
			close_record(&current, &sequences)?;
			let id = protein_id(line)
				.ok_or_else(|| InputError::Fasta { line: line_number, reason: "header has no protein id".to_owned() })?;
			if headers.contains_key(&id) {
				return Err(InputError::Fasta { line: line_number, reason: format!("duplicate protein id '{}'", id) }.into());
			}
			headers.insert(id.clone(), line.to_owned());
			sequences.insert(id.clone(), String::new());
			current = Some((id, line_number));
		} else {
			let Some((id, _)) = &current else {
				return Err(InputError::Fasta { line: line_number, reason: "sequence data before the first header".to_owned() }.into());
			};
			if let Some(sequence) = sequences.get_mut(id) {
				sequence.extend(line.chars().filter(|c| !c.is_whitespace()));
			}
		}
	}
	close_record(&current, &sequences)?;

	ProteinDatabase::new(sequences, headers)
}

/// Rejects a finished record that has no residues.
fn close_record(current: &Option<(String, usize)>, sequences: &SequenceMap) -> Result<()> {
	if let Some((id, line)) = current {
		if sequences.get(id).is_none_or(String::is_empty) {
			return Err(InputError::Fasta { line: *line, reason: format!("protein '{}' has no sequence", id) }.into());
		}
	}
	Ok(())
}

/// Extracts the protein identifier from a header line.
///
/// Examples:
/// - `>sp|P69905|HBA_HUMAN Hemoglobin` → `P69905`
/// - `>P69905 Hemoglobin` → `P69905`
pub fn protein_id(header: &str) -> Option<String> {
	let body = header.strip_prefix('>').unwrap_or(header);
	let id = match body.split_once('|') {
		Some((_, rest)) => rest.split('|').next().unwrap_or_default().trim(),
		None => body.split_whitespace().next().unwrap_or_default(),
	};
	if id.is_empty() { None } else { Some(id.to_owned()) }
}

/// Splits `sequence` into lines of at most `width` characters.
pub fn wrap(sequence: &str, width: usize) -> Vec<String> {
	let chars: Vec<char> = sequence.chars().collect();
	chars.chunks(width.max(1)).map(|chunk| chunk.iter().collect()).collect()
}

fn write_record<W: Write>(writer: &mut W, header: &str, sequence: &str) -> io::Result<()> {
	writeln!(writer, "{}", header)?;
	for line in wrap(sequence, FASTA_LINE_WIDTH) {
		writeln!(writer, "{}", line)?;
	}
	Ok(())
}

/// Writes one FASTA record per identifier.
///
/// # Errors
/// Returns an error if `sequences` and `headers` hold different identifiers.
pub fn write_fasta<P: AsRef<Path>>(filename: P, sequences: &SequenceMap, headers: &SequenceMap) -> Result<()> {
	if !same_ids(sequences, headers) {
		return Err(InputError::IdMismatch { left: "sequences", right: "headers" }.into());
	}

	let mut writer = BufWriter::new(File::create(&filename)?);
	for (id, sequence) in sequences {
		write_record(&mut writer, &headers[id], sequence)?;
	}
	writer.flush()?;
	debug!("Wrote {} records to {}", sequences.len(), filename.as_ref().display());
	Ok(())
}

/// Writes the concatenated search database: each target followed by its
/// decoy.
///
/// # Errors
/// Returns an error if the decoy tables do not hold the target identifiers.
pub fn write_database<P: AsRef<Path>>(
	filename: P,
	targets: &ProteinDatabase,
	decoys: &SequenceMap,
	decoy_headers: &SequenceMap,
) -> Result<()> {
	if !same_ids(targets.sequences(), decoys) {
		return Err(InputError::IdMismatch { left: "target sequences", right: "decoy sequences" }.into());
	}
	if !same_ids(decoys, decoy_headers) {
		return Err(InputError::IdMismatch { left: "decoy sequences", right: "decoy headers" }.into());
	}

	let mut writer = BufWriter::new(File::create(&filename)?);
	for (id, sequence) in targets.sequences() {
		write_record(&mut writer, &targets.headers()[id], sequence)?;
		write_record(&mut writer, &decoy_headers[id], &decoys[id])?;
	}
	writer.flush()?;
	info!("Wrote {} target/decoy pairs to {}", targets.len(), filename.as_ref().display());
	Ok(())
}

/// Writes a two-column `key,value` CSV report.
pub fn write_csv<P, K, V>(filename: P, rows: impl IntoIterator<Item = (K, V)>) -> Result<()>
where
	P: AsRef<Path>,
	K: Display,
	V: Display,
{
	let mut writer = csv::Writer::from_path(&filename)?;
	writer.write_record(["key", "value"])?;
	for (key, value) in rows {
		writer.write_record([key.to_string(), value.to_string()])?;
	}
	writer.flush()?;
	debug!("Wrote report {}", filename.as_ref().display());
	Ok(())
}

/// Swaps the extension of `path`, keeping its directory and stem.
///
/// `out/concat.fasta` + `"bin"` → `out/concat.bin`
pub fn build_output_path<P: AsRef<Path>>(path: P, extension: &str) -> Result<PathBuf> {
	let path = path.as_ref();
	if path.file_stem().is_none() {
		return Err(InputError::NoFileName(path.to_path_buf()).into());
	}
	Ok(path.with_extension(extension))
}

/// File name of `path` without directory and extension, used to prefix
/// report names.
pub fn file_stem<P: AsRef<Path>>(path: P) -> Result<String> {
	let path = path.as_ref();
	path.file_stem()
		.map(|stem| stem.to_string_lossy().into_owned())
		.ok_or_else(|| InputError::NoFileName(path.to_path_buf()).into())
}
