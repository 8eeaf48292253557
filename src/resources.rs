use std::ffi;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResError {
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("file contains nil: {path}")]
    FileContainsNil { path: PathBuf },
    #[error("failed to get exe path")]
    FailedToGetExePath,
}

/// Asset root that resource names are resolved against.
///
/// Names use `/` as separator regardless of platform, e.g. `shaders/quad.vert`.
#[derive(Debug, Clone)]
pub struct Resources {
    root_path: PathBuf,
}

impl Resources {
    /// Resolves `rel_path` against the directory holding the executable.
    /// An absolute `rel_path` is used as-is.
    pub fn from_relative_exe_path(rel_path: &Path) -> Result<Resources, ResError> {
        let exe_file_name = ::std::env::current_exe().map_err(|_| ResError::FailedToGetExePath)?;
        let exe_path = exe_file_name.parent().ok_or(ResError::FailedToGetExePath)?;
        Ok(Resources {
            root_path: exe_path.join(rel_path),
        })
    }

    #[cfg(test)]
    pub fn from_path(root_path: impl Into<PathBuf>) -> Resources {
        Resources {
            root_path: root_path.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    pub fn path_of(&self, resource_name: &str) -> PathBuf {
        resource_name_to_path(&self.root_path, resource_name)
    }

    pub fn load_cstring(&self, resource_name: &str) -> Result<ffi::CString, ResError> {
        let path = self.path_of(resource_name);
        let io_err = |source| ResError::Io {
            path: path.clone(),
            source,
        };

        let mut file = fs::File::open(&path).map_err(io_err)?;

        // allocate buffer of the same size as file
        let len = file.metadata().map_err(io_err)?.len() as usize;
        let mut buffer: Vec<u8> = Vec::with_capacity(len + 1);
        file.read_to_end(&mut buffer).map_err(io_err)?;

        ffi::CString::new(buffer).map_err(|_| ResError::FileContainsNil { path })
    }
}

fn resource_name_to_path(root_dir: &Path, location: &str) -> PathBuf {
    let mut path: PathBuf = root_dir.into();
    for part in location.split('/') {
        path = path.join(part);
    }
    path
}


#[cfg(test)]
mod tests {
    use super::test_support::TempAssets;
    use super::*;

    #[test]
    fn names_are_split_on_slashes() {
        let res = Resources::from_path("/root");
        assert_eq!(
            res.path_of("shaders/quad.vert"),
            Path::new("/root").join("shaders").join("quad.vert")
        );
    }

    #[test]
    fn load_cstring_reads_whole_file() {
        let assets = TempAssets::new("res-read");
        assets.write("shaders/a.vert", b"void main() {}\n");

        let source = assets.resources().load_cstring("shaders/a.vert").unwrap();
        assert_eq!(source.to_bytes(), b"void main() {}\n");
    }

    #[test]
    fn missing_file_is_io_error() {
        let assets = TempAssets::new("res-missing");
        let err = assets.resources().load_cstring("nope.frag").unwrap_err();
        assert!(matches!(err, ResError::Io { .. }));
        assert!(err.to_string().contains("nope.frag"));
    }

    #[test]
    fn interior_nul_is_rejected() {
        let assets = TempAssets::new("res-nul");
        assets.write("bad.vert", b"void\0main");
        let err = assets.resources().load_cstring("bad.vert").unwrap_err();
        assert!(matches!(err, ResError::FileContainsNil { .. }));
    }
}
