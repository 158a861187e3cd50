use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{FilePacker, PackFileRequest, PackFileResult, PackFormat};
use crate::error::Result;
use crate::utils;

/// Packs files on this machine instead of calling DataFileUtil.
///
/// Packed copies are written to `work_dir` as `<file name>.gz`; the input is
/// left in place.
#[derive(Debug, Clone)]
pub struct LocalPacker {
    work_dir: PathBuf,
}

impl LocalPacker {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    fn gzip(&self, path: &Path) -> Result<PathBuf> {
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} has no file name", path.display()),
            )
        })?;
        let mut packed_name = file_name.to_os_string();
        packed_name.push(".gz");

        utils::mkdir(&self.work_dir)?;
        let target = self.work_dir.join(packed_name);
        tracing::debug!("gzip {} -> {}", path.display(), target.display());

        let mut input = BufReader::new(File::open(path)?);
        let mut encoder = GzEncoder::new(BufWriter::new(File::create(&target)?), Compression::default());
        io::copy(&mut input, &mut encoder)?;
        encoder.finish()?.flush()?;

        Ok(target)
    }
}

impl FilePacker for LocalPacker {
    fn pack_file(&self, request: &PackFileRequest) -> Result<PackFileResult> {
        let file_path = match request.pack {
            PackFormat::Gzip => self.gzip(&request.file_path)?,
        };
        Ok(PackFileResult { file_path })
    }
}
