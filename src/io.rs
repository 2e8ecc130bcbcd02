use crate::error::InetStatsError;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Opens a file located locally or remotely as a buffered reader. Content of `.gz` files is
/// decompressed on the fly; anything else is read as-is.
pub(crate) fn get_reader(path: &str) -> Result<Box<dyn BufRead + Send>, InetStatsError> {
    let reader = oneio::get_reader(path)?;
    Ok(Box::new(BufReader::new(reader)))
}

/// Runs `write` against `sink`, gzip-compressed if `gz` is set, and returns the flushed sink.
/// The gzip trailer is written by an explicit `finish`, so its errors are returned.
pub(crate) fn write_encoded<W, F>(sink: W, gz: bool, write: F) -> Result<W, InetStatsError>
where
    W: Write,
    F: FnOnce(&mut dyn Write) -> Result<(), InetStatsError>,
{
    let mut sink = if gz {
        let mut encoder = GzEncoder::new(sink, Compression::default());
        write(&mut encoder)?;
        encoder.finish()?
    } else {
        let mut sink = sink;
        write(&mut sink)?;
        sink
    };
    sink.flush()?;
    Ok(sink)
}

/// Creates the local file `path` and fills it through `write`, compressing the content if the
/// path ends in `.gz`. Returns once the data is synced to disk.
pub(crate) fn write_file<F>(path: &Path, write: F) -> Result<(), InetStatsError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), InetStatsError>,
{
    let gz = path.extension().is_some_and(|ext| ext == "gz");
    let file = write_encoded(BufWriter::new(File::create(path)?), gz, write)?;
    file.into_inner()
        .map_err(|e| e.into_error())?
        .sync_all()?;
    Ok(())
}

/// Downloads `url` to `local_path` unless a copy already exists there.
///
/// The file is first written next to its final location and renamed once complete, so an
/// interrupted download never leaves a truncated file behind as cache.
pub(crate) fn download_cached(
    url: &str,
    local_path: &Path,
    force_reload: bool,
) -> Result<(), InetStatsError> {
    if local_path.exists() && !force_reload {
        info!("using cached {}", local_path.display());
        return Ok(());
    }
    if let Some(parent) = local_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let partial = local_path.with_extension("part");
    info!("downloading {} to {}", url, local_path.display());
    oneio::download(url, &partial.to_string_lossy())?;
    std::fs::rename(&partial, local_path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_gz_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ripe.db.route.gz");

        write_file(&path, |writer| {
            writer.write_all(b"route: 192.0.2.0/24\nmnt-by: EX-MNT\n")?;
            Ok(())
        })
        .unwrap();

        // the file on disk is compressed
        let raw = std::fs::read(&path).unwrap();
        assert_eq!(&raw[..2], &[0x1f, 0x8b]);

        let mut content = String::new();
        get_reader(path.to_str().unwrap())
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "route: 192.0.2.0/24\nmnt-by: EX-MNT\n");
    }

    /// Accepts `capacity` bytes, then fails like a full disk.
    struct LimitedSink {
        capacity: usize,
    }

    impl Write for LimitedSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.capacity == 0 {
                return Err(std::io::Error::other("no space left on device"));
            }
            let n = buf.len().min(self.capacity);
            self.capacity -= n;
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_gz_finish_error_is_returned() {
        // the gzip header fits, the compressed body and trailer written by finish do not
        let result = write_encoded(LimitedSink { capacity: 10 }, true, |writer| {
            writer.write_all(b"{\"version\": 1, \"maintainers\": {}}")?;
            Ok(())
        });
        assert!(matches!(result, Err(InetStatsError::IoError(_))));

        let plain = write_encoded(LimitedSink { capacity: 64 }, false, |writer| {
            writer.write_all(b"{}")?;
            Ok(())
        });
        assert!(plain.is_ok());
    }

    #[test]
    fn test_plain_file_is_not_compressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        write_file(&path, |writer| {
            writer.write_all(b"{}")?;
            Ok(())
        })
        .unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"{}");
    }

    #[test]
    fn test_download_cached_reuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ripe.db.route.gz");
        std::fs::write(&path, b"cached").unwrap();

        // the url is never contacted because the file is already present
        download_cached("http://invalid.invalid/ripe.db.route.gz", &path, false).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"cached");
    }
}
