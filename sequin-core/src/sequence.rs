//! Inference of numbered image sequences from a single sample file.

use crate::decompose::{decompose, FilenameRoot};
use crate::error::{Result, SequenceError};
use crate::pattern::CanonicalPattern;
use crate::siblings::{extension_key, fetch_siblings, list_files};
use crate::similarity::{sample_size, EditDistanceScorer, SegmentScorer};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::path::{Path, PathBuf};

/// Options controlling how a sequence is inferred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferOptions {
    /// Reject filenames with more than one changing number
    pub strict: bool,
    /// Compare against every sibling instead of a power-of-ten sample
    pub full_scan: bool,
}

impl Default for InferOptions {
    fn default() -> Self {
        Self {
            strict: true,
            full_scan: false,
        }
    }
}

/// What the sample file turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SequenceKind {
    /// No other file of the same type next to the sample
    Single,
    Sequence {
        /// Counter value of the sample file
        sample_number: u64,
        /// Smallest existing counter value
        start_number: u64,
    },
}

/// Description of the image sequence a sample file belongs to.
///
/// The sibling listing is taken once at construction; later changes to the
/// directory are only seen by [`ImageSequence::list_sequence_files`] on its
/// first call.
#[derive(Debug)]
pub struct ImageSequence {
    basedir: PathBuf,
    original_filename: String,
    root: FilenameRoot,
    counter_index: Option<usize>,
    pattern: CanonicalPattern,
    kind: SequenceKind,
    siblings: Vec<String>,
    messages: Vec<String>,
    listing: OnceCell<Vec<(Option<u64>, String)>>,
    gaps: OnceCell<Option<Vec<String>>>,
}

/// Infer the sequence `sample` belongs to using the default scorer
pub fn infer(sample: &Path, allowed_extensions: &[String], options: InferOptions) -> Result<ImageSequence> {
    infer_with_scorer(sample, allowed_extensions, options, &EditDistanceScorer)
}

/// Infer the sequence `sample` belongs to with a custom segment scorer
pub fn infer_with_scorer(
    sample: &Path,
    allowed_extensions: &[String],
    options: InferOptions,
    scorer: &dyn SegmentScorer,
) -> Result<ImageSequence> {
    let (basedir, filename, root_text, extension) = validate_sample(sample, allowed_extensions)?;
    let root = decompose(&root_text)?;

    let siblings = fetch_siblings(&basedir, &extension)?;
    let file_count = siblings.len();
    debug!(
        "Found {} file(s) with extension {} in {}",
        file_count,
        extension,
        basedir.display()
    );

    if file_count < 2 {
        info!("{} is a single file, not a sequence", filename);
        return Ok(ImageSequence {
            pattern: CanonicalPattern::literal(&root_text, &extension),
            messages: vec![format!(
                "Unable to find image sequence files other than '{}' at the specified path",
                filename
            )],
            basedir,
            original_filename: filename,
            root,
            counter_index: None,
            kind: SequenceKind::Single,
            siblings,
            listing: OnceCell::new(),
            gaps: OnceCell::new(),
        });
    }

    let mut messages = Vec::new();
    if file_count == 2 {
        messages.push(format!(
            "Only one frame found besides '{}'",
            filename
        ));
    }

    let limit = if options.full_scan {
        file_count
    } else {
        sample_size(file_count)
    };
    let sibling_roots: Vec<&str> = siblings
        .iter()
        .take(limit)
        .filter(|name| **name != filename)
        .map(|name| strip_extension(name))
        .collect();

    let candidates = predict_counter(&root, &sibling_roots, scorer);
    if candidates.is_empty() || candidates.len() > root.len() {
        return Err(SequenceError::AmbiguousSequence(format!(
            "unable to predict number sequence for '{}'",
            filename
        )));
    }
    if candidates.len() > 1 {
        if options.strict {
            return Err(SequenceError::AmbiguousSequence(format!(
                "more than one number sequence found in '{}' ({} found)",
                filename,
                candidates.len()
            )));
        }
        messages.push(format!(
            "Multiple number sequences detected in '{}' ({} found) but strict mode is disabled; using the last one",
            filename,
            candidates.len()
        ));
    }

    // candidates is non-empty here
    let counter_index = candidates[candidates.len() - 1];
    let pattern = CanonicalPattern::with_counter(&root, counter_index, &extension)?;
    let counter_text = &root.body()[counter_index].text;
    let sample_number: u64 = counter_text.parse().map_err(|_| {
        SequenceError::InvalidArgument(format!(
            "counter '{}' is larger than the supported maximum of {}",
            counter_text,
            u64::MAX
        ))
    })?;
    let start_number = resolve_start_number(&basedir, &pattern, sample_number, &siblings)?;

    info!(
        "{} -> pattern {} (sample {}, start {})",
        filename, pattern, sample_number, start_number
    );

    Ok(ImageSequence {
        basedir,
        original_filename: filename,
        root,
        counter_index: Some(counter_index),
        pattern,
        kind: SequenceKind::Sequence {
            sample_number,
            start_number,
        },
        siblings,
        messages,
        listing: OnceCell::new(),
        gaps: OnceCell::new(),
    })
}

/// Check the sample's preconditions and split it into its parts
fn validate_sample(
    sample: &Path,
    allowed_extensions: &[String],
) -> Result<(PathBuf, String, String, String)> {
    if !sample.exists() {
        return Err(SequenceError::InvalidInput(format!(
            "the specified path '{}' does not exist",
            sample.display()
        )));
    }
    if !sample.is_file() {
        return Err(SequenceError::InvalidInput(format!(
            "the specified path '{}' is not a file",
            sample.display()
        )));
    }

    let filename = sample
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            SequenceError::InvalidInput(format!("'{}' has no valid file name", sample.display()))
        })?
        .to_string();

    let ext_key = extension_key(sample).ok_or_else(|| {
        SequenceError::InvalidInput(format!("'{}' has no file extension", filename))
    })?;
    if !allowed_extensions
        .iter()
        .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(&ext_key))
    {
        return Err(SequenceError::InvalidInput(format!(
            "'.{}' is not a supported file format",
            ext_key.to_lowercase()
        )));
    }

    if filename.contains('%') {
        return Err(SequenceError::InvalidInput(format!(
            "the filename '{}' contains one or more % characters, which are reserved for the counter token",
            filename
        )));
    }

    let root = strip_extension(&filename).to_string();
    if root.is_empty() {
        return Err(SequenceError::InvalidInput(format!(
            "'{}' has an empty filename root",
            filename
        )));
    }
    let extension = filename[root.len()..].to_string();

    let basedir = match sample.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok((basedir, filename, root, extension))
}

/// Filename without its last extension
fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(0) | None => name,
        Some(i) => &name[..i],
    }
}

/// Indices of the segments that look like a frame counter
fn predict_counter(root: &FilenameRoot, sibling_roots: &[&str], scorer: &dyn SegmentScorer) -> Vec<usize> {
    let mut offset = 0;
    let mut predicted = Vec::new();
    for (i, segment) in root.body().iter().enumerate() {
        let score = scorer.score(segment, offset, sibling_roots);
        debug!("Segment {} '{}' at {} scored {}", i, segment.text, offset, score);
        if scorer.is_candidate(segment, score) {
            predicted.push(i);
        }
        offset += segment.len();
    }
    predicted
}

/// Smallest counter value below `sample_number` whose file exists
fn resolve_start_number(
    basedir: &Path,
    pattern: &CanonicalPattern,
    sample_number: u64,
    siblings: &[String],
) -> Result<u64> {
    if sample_number == 0 {
        return Ok(0);
    }
    let matcher = pattern.matcher(true)?;
    let start = siblings
        .iter()
        .filter_map(|name| matcher.counter_value(name).map(|value| (value, name)))
        .filter(|(value, name)| *value < sample_number && pattern.render(*value) == **name)
        .filter(|(_, name)| basedir.join(name).is_file())
        .map(|(value, _)| value)
        .min()
        .unwrap_or(sample_number);
    Ok(start)
}

impl ImageSequence {
    pub fn basedir(&self) -> &Path {
        &self.basedir
    }

    pub fn original_filename(&self) -> &str {
        &self.original_filename
    }

    pub fn path(&self) -> PathBuf {
        self.basedir.join(&self.original_filename)
    }

    pub fn root(&self) -> &FilenameRoot {
        &self.root
    }

    /// Index of the counter segment in [`Self::root`]
    pub fn counter_index(&self) -> Option<usize> {
        self.counter_index
    }

    pub fn pattern(&self) -> &CanonicalPattern {
        &self.pattern
    }

    pub fn kind(&self) -> SequenceKind {
        self.kind
    }

    pub fn is_single(&self) -> bool {
        self.kind == SequenceKind::Single
    }

    pub fn sample_number(&self) -> Option<u64> {
        match self.kind {
            SequenceKind::Single => None,
            SequenceKind::Sequence { sample_number, .. } => Some(sample_number),
        }
    }

    /// Start number, or `-1` for a single file
    pub fn start_number(&self) -> i64 {
        match self.kind {
            SequenceKind::Single => -1,
            SequenceKind::Sequence { start_number, .. } => {
                i64::try_from(start_number).unwrap_or(i64::MAX)
            },
        }
    }

    pub fn starts_at_zero(&self) -> bool {
        self.start_number() == 0
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Files sharing the sample's extension, sample included
    pub fn siblings(&self) -> &[String] {
        &self.siblings
    }

    pub fn file_count(&self) -> usize {
        self.siblings.len()
    }

    /// Filenames missing between the start number and the start number
    /// plus the file count.
    ///
    /// The upper bound is the number of files, not the highest counter, so
    /// stray files of the same type widen the range.
    pub fn detect_gaps(&self) -> Option<Vec<String>> {
        self.gaps
            .get_or_init(|| {
                let SequenceKind::Sequence { start_number, .. } = self.kind else {
                    return None;
                };
                let count = self.siblings.len() as u64;
                let missing: Vec<String> = (start_number..start_number.saturating_add(count))
                    .map(|i| self.pattern.render(i))
                    .filter(|name| !self.siblings.contains(name))
                    .collect();
                if missing.is_empty() {
                    None
                } else {
                    Some(missing)
                }
            })
            .clone()
    }

    /// All files in the base directory matching the canonical pattern.
    ///
    /// With `sort`, files are ordered by counter value so that `img_9`
    /// comes before `img_10`.
    pub fn list_sequence_files(&self, sort: bool) -> Result<Vec<String>> {
        let listing = self.listing()?;
        if !sort {
            return Ok(listing.iter().map(|(_, name)| name.clone()).collect());
        }
        let mut sorted: Vec<&(Option<u64>, String)> = listing.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        Ok(sorted.into_iter().map(|(_, name)| name.clone()).collect())
    }

    fn listing(&self) -> Result<&[(Option<u64>, String)]> {
        if let Some(listing) = self.listing.get() {
            return Ok(listing.as_slice());
        }
        let matcher = self.pattern.matcher(true)?;
        let scanned: Vec<(Option<u64>, String)> = list_files(&self.basedir)?
            .into_iter()
            .filter(|name| matcher.is_match(name))
            .map(|name| (matcher.counter_value(&name), name))
            .collect();
        debug!(
            "Matched {} file(s) against {}",
            scanned.len(),
            matcher.as_str()
        );
        Ok(self.listing.get_or_init(|| scanned).as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn formats() -> Vec<String> {
        vec!["PNG".to_string(), "JPG".to_string()]
    }

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), b"frame").unwrap();
        }
    }

    #[test]
    fn test_infer_padded_sequence() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), &["img_000.jpg", "img_001.jpg", "img_002.jpg"]);

        let seq = infer(&temp.path().join("img_001.jpg"), &formats(), InferOptions::default()).unwrap();
        assert_eq!(seq.pattern().token_filename(), "img_%03d.jpg");
        assert_eq!(seq.sample_number(), Some(1));
        assert_eq!(seq.start_number(), 0);
        assert!(seq.starts_at_zero());
        assert_eq!(seq.counter_index(), Some(1));
    }

    #[test]
    fn test_infer_single_file() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), &["single.png", "other.jpg"]);

        let seq = infer(&temp.path().join("single.png"), &formats(), InferOptions::default()).unwrap();
        assert!(seq.is_single());
        assert_eq!(seq.start_number(), -1);
        assert!(!seq.pattern().has_counter());
        assert_eq!(seq.pattern().token_filename(), "single.png");
        assert_eq!(seq.messages().len(), 1);
        assert_eq!(seq.detect_gaps(), None);
    }

    #[test]
    fn test_start_number_found_below_sample() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), &["shot_0003.png", "shot_0005.png", "shot_0009.png"]);

        let seq = infer(&temp.path().join("shot_0009.png"), &formats(), InferOptions::default()).unwrap();
        assert_eq!(seq.sample_number(), Some(9));
        assert_eq!(seq.start_number(), 3);
    }

    #[test]
    fn test_static_number_is_not_counter() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), &["cam2_take_0010.png", "cam2_take_0011.png", "cam2_take_0012.png"]);

        let seq = infer(
            &temp.path().join("cam2_take_0011.png"),
            &formats(),
            InferOptions::default(),
        )
        .unwrap();
        assert_eq!(seq.pattern().token_filename(), "cam2_take_%04d.png");
        assert_eq!(seq.start_number(), 10);
    }

    #[test]
    fn test_two_changing_numbers_strict_fails() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), &["a1_b1.png", "a2_b2.png", "a3_b3.png"]);

        let err = infer(&temp.path().join("a1_b1.png"), &formats(), InferOptions::default()).unwrap_err();
        assert!(matches!(err, SequenceError::AmbiguousSequence(_)));
        assert!(err.to_string().contains("more than one number sequence"));
    }

    #[test]
    fn test_two_changing_numbers_non_strict() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), &["a1_b1.png", "a2_b2.png", "a3_b3.png"]);

        let options = InferOptions {
            strict: false,
            ..InferOptions::default()
        };
        let seq = infer(&temp.path().join("a2_b2.png"), &formats(), options).unwrap();
        assert_eq!(seq.pattern().token_filename(), "a2_b%d.png");
        assert!(seq
            .messages()
            .iter()
            .any(|m| m.contains("strict mode is disabled")));
    }

    #[test]
    fn test_no_counter_fails() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), &["alpha.png", "beta.png"]);

        let err = infer(&temp.path().join("alpha.png"), &formats(), InferOptions::default()).unwrap_err();
        assert!(matches!(err, SequenceError::AmbiguousSequence(_)));
    }

    #[test]
    fn test_invalid_inputs() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), &["img_%01.png", "clip_001.mov"]);
        fs::create_dir(temp.path().join("dir_001.png")).unwrap();

        for name in ["img_%01.png", "clip_001.mov", "missing_001.png", "dir_001.png"] {
            let err = infer(&temp.path().join(name), &formats(), InferOptions::default()).unwrap_err();
            assert!(
                matches!(err, SequenceError::InvalidInput(_)),
                "expected invalid input for {name}"
            );
        }
    }

    #[test]
    fn test_extension_case_insensitive() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), &["img_01.PNG", "img_02.PNG"]);

        let seq = infer(&temp.path().join("img_01.PNG"), &formats(), InferOptions::default()).unwrap();
        assert_eq!(seq.pattern().token_filename(), "img_%02d.PNG");
    }

    #[test]
    fn test_detect_gaps() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), &["frame_0.png", "frame_2.png"]);

        let seq = infer(&temp.path().join("frame_0.png"), &formats(), InferOptions::default()).unwrap();
        assert_eq!(seq.detect_gaps(), Some(vec!["frame_1.png".to_string()]));
    }

    #[test]
    fn test_detect_gaps_complete() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), &["f_01.png", "f_02.png", "f_03.png"]);

        let seq = infer(&temp.path().join("f_02.png"), &formats(), InferOptions::default()).unwrap();
        assert_eq!(seq.start_number(), 1);
        assert_eq!(seq.detect_gaps(), None);
    }

    #[test]
    fn test_list_sequence_files_numeric_sort() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), &["img_10.png", "img_9.png", "img_11.png", "other.png"]);

        let seq = infer(&temp.path().join("img_9.png"), &formats(), InferOptions::default()).unwrap();
        assert_eq!(seq.pattern().token_filename(), "img_%d.png");
        let files = seq.list_sequence_files(true).unwrap();
        assert_eq!(files, vec!["img_9.png", "img_10.png", "img_11.png"]);
        assert_eq!(seq.list_sequence_files(true).unwrap(), files);

        let unsorted = seq.list_sequence_files(false).unwrap();
        assert_eq!(unsorted, vec!["img_10.png", "img_11.png", "img_9.png"]);
    }

    #[test]
    fn test_single_file_listing() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), &["single.png"]);

        let seq = infer(&temp.path().join("single.png"), &formats(), InferOptions::default()).unwrap();
        assert_eq!(seq.list_sequence_files(true).unwrap(), vec!["single.png"]);
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("img_001.png"), "img_001");
        assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
        assert_eq!(strip_extension(".hidden"), ".hidden");
        assert_eq!(strip_extension("plain"), "plain");
    }

    struct NeverScorer;

    impl SegmentScorer for NeverScorer {
        fn score(&self, _segment: &crate::decompose::Segment, _offset: usize, _siblings: &[&str]) -> usize {
            0
        }
    }

    #[test]
    fn test_custom_scorer() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), &["img_000.jpg", "img_001.jpg"]);

        let err = infer_with_scorer(
            &temp.path().join("img_001.jpg"),
            &formats(),
            InferOptions::default(),
            &NeverScorer,
        )
        .unwrap_err();
        assert!(matches!(err, SequenceError::AmbiguousSequence(_)));
    }
}
