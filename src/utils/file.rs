use std::{
    ffi::OsStr,
    fmt::Display,
    fs::{File, OpenOptions},
    io::{self, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use derive_builder::Builder;
use futures_util::{Stream, StreamExt};

use crate::{RedcapError, error, logging::Logger};

#[cfg(test)]
#[path = "./file_test.rs"]
mod file_test;

#[derive(Builder, Debug, Clone)]
pub struct ResponseFileOpts {
    /// Name of the file to create. Double quotes are stripped, as servers often send
    /// quoted names in `Content-Disposition`.
    #[builder(setter(into))]
    pub(crate) file_name: String,

    #[builder(setter(into), default = PathBuf::from("."))]
    pub(crate) directory: PathBuf,

    /// Replace an existing file instead of failing with `AlreadyExists`.
    #[builder(default = false)]
    pub(crate) overwrite: bool,

    #[builder(setter(into), default)]
    pub(crate) logger: Logger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub bytes_written: u64,
}

/// Destination for a downloaded response body.
#[derive(Debug, Clone)]
pub struct ResponseFile {
    opts: ResponseFileOpts,
}

impl ResponseFile {
    pub fn new(opts: ResponseFileOpts) -> Self {
        Self { opts }
    }

    /// Full destination path, with the file name sanitised.
    pub fn path(&self) -> Result<PathBuf, RedcapError> {
        let name = self.opts.file_name.replace('"', "");

        if name.is_empty() || Path::new(&name).file_name() != Some(OsStr::new(&name)) {
            return Err(error!(
                InvalidInput,
                message = format!("{:?} is not a valid file name", self.opts.file_name)
            ));
        }

        Ok(self.opts.directory.join(name))
    }

    /// Copies everything from `reader` into the file.
    pub fn write_reader<R: Read>(&self, mut reader: R) -> Result<WrittenFile, RedcapError> {
        let (path, mut writer) = self.create()?;

        match io::copy(&mut reader, &mut writer) {
            Ok(bytes_written) => self.finish(path, writer, bytes_written),
            Err(e) => Err(self.fail(&path, &mut writer, e)),
        }
    }

    /// Copies every chunk of `stream` into the file, stopping at the first failed chunk.
    pub async fn write_stream<S, B, E>(&self, stream: S) -> Result<WrittenFile, RedcapError>
    where
        S: Stream<Item = Result<B, E>>,
        B: AsRef<[u8]>,
        E: Display,
    {
        let (path, mut writer) = self.create()?;
        let mut bytes_written = 0u64;

        futures_util::pin_mut!(stream);

        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => return Err(self.fail(&path, &mut writer, e)),
            };

            if let Err(e) = writer.write_all(chunk.as_ref()) {
                return Err(self.fail(&path, &mut writer, e));
            }

            bytes_written += chunk.as_ref().len() as u64;
        }

        self.finish(path, writer, bytes_written)
    }

    fn create(&self) -> Result<(PathBuf, BufWriter<File>), RedcapError> {
        let path = self.path()?;

        if !self.opts.overwrite && path.exists() {
            return Err(already_exists(&path));
        }

        let mut options = OpenOptions::new();
        options.write(true);

        if self.opts.overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        match options.open(&path) {
            Ok(file) => Ok((path, BufWriter::new(file))),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(already_exists(&path)),
            Err(e) => {
                self.opts.logger.scope(|| {
                    tracing::error!(path = %path.display(), error = %e, "failed to open file");
                });
                Err(error!(OperationFailed, e))
            }
        }
    }

    fn finish(
        &self,
        path: PathBuf,
        mut writer: BufWriter<File>,
        bytes_written: u64,
    ) -> Result<WrittenFile, RedcapError> {
        if let Err(e) = writer.flush() {
            return Err(self.fail(&path, &mut writer, e));
        }

        self.opts.logger.scope(|| {
            tracing::debug!(path = %path.display(), bytes = bytes_written, "wrote response file");
        });

        Ok(WrittenFile {
            path,
            bytes_written,
        })
    }

    // Whatever was copied so far stays on disk.
    fn fail(&self, path: &Path, writer: &mut BufWriter<File>, e: impl Display) -> RedcapError {
        let _ = writer.flush();

        self.opts.logger.scope(|| {
            tracing::error!(path = %path.display(), error = %e, "failed to write response file");
        });

        error!(OperationFailed, message = e)
    }
}

fn already_exists(path: &Path) -> RedcapError {
    error!(
        AlreadyExists,
        message = format!("file {} already exists", path.display())
    )
}
