//! Stamping a default appearance onto an annotation of a PDF file.

use crate::error::StampError;
use pdfext_appearance::{AppearanceComponents, ColorOperands};
use pdfext_core::{Extension, SaveFlags};
use serde::Serialize;
use std::path::PathBuf;

/// Where a new FreeText annotation goes when none is selected.
const DEFAULT_RECT: [f32; 4] = [72.0, 72.0, 288.0, 108.0];

/// What to stamp, and where.
#[derive(Debug, Clone, PartialEq)]
pub struct StampOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub page: usize,
    /// Existing annotation to update; a FreeText annotation is created when `None`.
    pub annotation: Option<usize>,
    pub font: String,
    pub font_size: f32,
    pub color: [u32; 3],
    pub flags: SaveFlags,
}

impl StampOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            page: 0,
            annotation: None,
            font: "Helvetica".to_string(),
            font_size: 12.0,
            color: [0, 0, 0],
            flags: SaveFlags::Default,
        }
    }

    /// Parses `<input> <output> [--page N] [--annot N] [--font NAME]
    /// [--size PT] [--color R,G,B] [--flags N]`, without the program name.
    pub fn from_args<I>(args: I) -> Result<Self, StampError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let input = args
            .next()
            .ok_or_else(|| StampError::Usage("missing input path".into()))?;
        let output = args
            .next()
            .ok_or_else(|| StampError::Usage("missing output path".into()))?;
        let mut options = Self::new(input, output);

        while let Some(flag) = args.next() {
            let value = args
                .next()
                .ok_or_else(|| StampError::Usage(format!("{flag} needs a value")))?;
            match flag.as_str() {
                "--page" => options.page = parse_number(&flag, &value)?,
                "--annot" => options.annotation = Some(parse_number(&flag, &value)?),
                "--font" => options.font = value,
                "--size" => options.font_size = parse_number(&flag, &value)?,
                "--color" => options.color = parse_color(&value)?,
                "--flags" => {
                    options.flags = SaveFlags::from_raw(parse_number(&flag, &value)?)
                        .map_err(|err| StampError::Usage(err.to_string()))?;
                }
                _ => return Err(StampError::Usage(format!("unknown option {flag}"))),
            }
        }
        Ok(options)
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, StampError> {
    value
        .parse()
        .map_err(|_| StampError::Usage(format!("{flag}: cannot parse {value:?}")))
}

fn parse_color(value: &str) -> Result<[u32; 3], StampError> {
    let channels = value
        .split(',')
        .map(|c| parse_number::<u32>("--color", c.trim()))
        .collect::<Result<Vec<_>, _>>()?;
    <[u32; 3]>::try_from(channels)
        .map_err(|_| StampError::Usage(format!("--color expects R,G,B, got {value:?}")))
}

/// Outcome of a stamp, printed as JSON by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StampReport {
    pub page: usize,
    pub annotation: Option<usize>,
    pub appearance: String,
    pub font_name: String,
    pub font_size: f32,
    pub rgb: Option<[f32; 3]>,
    pub bytes_written: usize,
}

/// Loads `options.input`, sets the DA string, and writes the saved copy to
/// `options.output`. All handles opened here are closed again, also on failure.
pub fn stamp(ext: &mut Extension, options: &StampOptions) -> Result<StampReport, StampError> {
    let bytes = std::fs::read(&options.input)?;
    let doc = ext.load_document(&bytes)?;
    let result = stamp_document(ext, doc, options);
    ext.close_document(doc)?;
    result
}

fn stamp_document(
    ext: &mut Extension,
    doc: pdfext_core::DocumentHandle,
    options: &StampOptions,
) -> Result<StampReport, StampError> {
    let font = ext.load_standard_font(doc, &options.font)?;
    let annot = match options.annotation {
        Some(index) => ext.annotation(doc, options.page, index)?,
        None => ext.create_free_text_annotation(doc, options.page, DEFAULT_RECT)?,
    };
    let [r, g, b] = options.color;
    if !ext.set_default_appearance(Some(annot), Some(font), options.font_size, r, g, b)? {
        return Err(StampError::Rejected);
    }
    let appearance = ext.annotation_string_value(annot, "DA")?.unwrap_or_default();

    let sink = ext.open_sink()?;
    let saved = save_through(ext, doc, sink, options);
    ext.close_sink(sink)?;
    let bytes_written = saved?;
    log::info!("wrote {bytes_written} bytes to {}", options.output.display());

    let parsed = AppearanceComponents::parse(&appearance).map_err(pdfext_core::CoreError::from)?;
    Ok(StampReport {
        page: options.page,
        annotation: options.annotation,
        font_name: String::from_utf8_lossy(&parsed.font_name).into_owned(),
        font_size: parsed.font_size,
        rgb: match parsed.color {
            Some(ColorOperands::Rgb(r, g, b)) => Some([r, g, b]),
            _ => None,
        },
        appearance,
        bytes_written,
    })
}

fn save_through(
    ext: &mut Extension,
    doc: pdfext_core::DocumentHandle,
    sink: pdfext_core::SinkHandle,
    options: &StampOptions,
) -> Result<usize, StampError> {
    ext.save_as_copy(doc, sink, options.flags)?;
    let size = ext.sink_size(sink)?;
    let mut out = vec![0u8; size];
    let copied = ext.sink_copy_out(sink, &mut out, size)?;
    std::fs::write(&options.output, &out)?;
    Ok(copied)
}
