use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;

use crate::{frequency::NormalizedFrequency, kind::FacilityKind};

/// One memory channel in a CHIRP import file. Only location, name, frequency and
/// comment vary, the rest are fixed AM airband settings.
#[derive(Debug, PartialEq, Serialize)]
pub struct ChirpRow {
    #[serde(rename = "Location")]
    pub location: usize,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Frequency")]
    pub frequency: String,
    #[serde(rename = "Duplex")]
    pub duplex: &'static str,
    #[serde(rename = "Offset")]
    pub offset: &'static str,
    #[serde(rename = "Tone")]
    pub tone: &'static str,
    #[serde(rename = "rToneFreq")]
    pub r_tone_freq: &'static str,
    #[serde(rename = "cToneFreq")]
    pub c_tone_freq: &'static str,
    #[serde(rename = "DtcsCode")]
    pub dtcs_code: &'static str,
    #[serde(rename = "DtcsPolarity")]
    pub dtcs_polarity: &'static str,
    #[serde(rename = "RxDtcsCode")]
    pub rx_dtcs_code: &'static str,
    #[serde(rename = "CrossMode")]
    pub cross_mode: &'static str,
    #[serde(rename = "Mode")]
    pub mode: &'static str,
    #[serde(rename = "TStep")]
    pub t_step: &'static str,
    #[serde(rename = "Skip")]
    pub skip: &'static str,
    #[serde(rename = "Power")]
    pub power: &'static str,
    #[serde(rename = "Comment")]
    pub comment: String,
    #[serde(rename = "URCALL")]
    pub ur_call: &'static str,
    #[serde(rename = "RPT1CALL")]
    pub rpt1_call: &'static str,
    #[serde(rename = "RPT2CALL")]
    pub rpt2_call: &'static str,
    #[serde(rename = "DVCODE")]
    pub dv_code: &'static str,
}

impl ChirpRow {
    pub fn new(location: usize, frequency: &NormalizedFrequency) -> Self {
        Self {
            location,
            name: frequency.name.clone(),
            frequency: frequency.frequency_text(),
            duplex: "",
            offset: "0.600000",
            tone: "",
            r_tone_freq: "88.5",
            c_tone_freq: "88.5",
            dtcs_code: "23",
            dtcs_polarity: "NN",
            rx_dtcs_code: "23",
            cross_mode: "Tone->Tone",
            mode: "AM",
            t_step: "5",
            skip: "",
            power: "50W",
            comment: frequency.comment.clone(),
            ur_call: "",
            rpt1_call: "",
            rpt2_call: "",
            dv_code: "",
        }
    }
}

pub fn file_name(country: &str, kind: FacilityKind, suffix: &str) -> String {
    format!("{country}_{kind}{suffix}.csv").to_uppercase()
}

pub fn write<W: io::Write>(writer: W, frequencies: &[NormalizedFrequency]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    for (location, frequency) in frequencies.iter().enumerate() {
        writer.serialize(ChirpRow::new(location, frequency))?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes one CHIRP file per run. Nothing is written for an empty result, since
/// the header comes from the first row.
pub fn write_file(
    dir: &Path,
    country: &str,
    kind: FacilityKind,
    suffix: &str,
    frequencies: &[NormalizedFrequency],
) -> Result<Option<PathBuf>> {
    if frequencies.is_empty() {
        warn!("No {kind} frequencies for {country}, skipping CSV output");
        return Ok(None);
    }

    let path = dir.join(file_name(country, kind, suffix));
    let file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    write(file, frequencies).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {} frequencies to {}", frequencies.len(), path.display());

    Ok(Some(path))
}
