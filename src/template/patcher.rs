#![forbid(unsafe_code)]

//! In-place patching of marker blocks in a Swift source file
//!
//! A marker block runs from a start comment through the next matching end
//! comment. Every such block in the file is replaced with the freshly
//! generated text; content outside the blocks is preserved byte for byte.

use crate::output::atomic::write_atomically;
use crate::palette::Palette;
use crate::template::TemplateError;
use crate::template::blocks::{
    DICTIONARY_END, DICTIONARY_START, KEYCASE_END, KEYCASE_START, case_block, dictionary_block,
};
use log::{debug, info, warn};
use std::io;
use std::path::Path;

/// Result of patching a template's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub text: String,
    /// Number of `KEYCASE` blocks replaced
    pub case_blocks: usize,
    /// Number of `DICTIONARY` blocks replaced
    pub dictionary_blocks: usize,
}

/// Replace every `start ... end` block in `text` with `replacement`
///
/// Blocks are found left to right and never overlap: after a block is
/// replaced the scan resumes after its end marker. A start marker with no
/// end marker after it ends the scan and the remaining text is kept as is.
///
/// Returns the new text and the number of blocks replaced.
pub fn replace_marker_blocks(
    text: &str,
    start: &str,
    end: &str,
    replacement: &str,
) -> (String, usize) {
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut replaced = 0;

    while let Some(found) = text[cursor..].find(start) {
        let block_start = cursor + found;
        let search_from = block_start + start.len();
        let Some(found_end) = text[search_from..].find(end) else {
            warn!("{} without a following {}; leaving it untouched", start, end);
            break;
        };
        let block_end = search_from + found_end + end.len();

        output.push_str(&text[cursor..block_start]);
        output.push_str(replacement);
        cursor = block_end;
        replaced += 1;
    }

    output.push_str(&text[cursor..]);
    (output, replaced)
}

/// Patch both marker kinds in `text` for `palette`
///
/// Case blocks are replaced first, then dictionary blocks in the result.
pub fn patch_text(text: &str, palette: &Palette) -> PatchOutcome {
    let (text, case_blocks) =
        replace_marker_blocks(text, KEYCASE_START, KEYCASE_END, &case_block(palette));
    let (text, dictionary_blocks) = replace_marker_blocks(
        &text,
        DICTIONARY_START,
        DICTIONARY_END,
        &dictionary_block(palette),
    );

    PatchOutcome {
        text,
        case_blocks,
        dictionary_blocks,
    }
}

/// Patch the template at `path` in place
///
/// # Errors
///
/// Returns [`TemplateError::Read`] if the file can't be read as UTF-8 and
/// [`TemplateError::Write`] if the patched text can't be written back. The
/// original file is left intact on write failure.
pub fn patch_template(path: &Path, palette: &Palette) -> Result<PatchOutcome, TemplateError> {
    patch_template_with(path, palette, write_atomically)
}

/// Like [`patch_template`], writing the patched text with `write`
///
/// `write` is only called when the patched text differs from the file.
pub fn patch_template_with<W>(
    path: &Path,
    palette: &Palette,
    write: W,
) -> Result<PatchOutcome, TemplateError>
where
    W: FnOnce(&Path, &[u8]) -> io::Result<()>,
{
    let original = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let outcome = patch_text(&original, palette);
    if outcome.text == original {
        debug!("{} already up to date", path.display());
        return Ok(outcome);
    }

    write(path, outcome.text.as_bytes()).map_err(|source| TemplateError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "patched {} ({} case blocks, {} dictionary blocks)",
        path.display(),
        outcome.case_blocks,
        outcome.dictionary_blocks
    );
    Ok(outcome)
}
