use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::{Path, PathBuf};

/// Platform file name for a dynamic library called `name`
/// (`libname.so`, `libname.dylib`, `name.dll`).
pub fn library_file_name(name: &str) -> String {
    format!("{DLL_PREFIX}{name}{DLL_SUFFIX}")
}

/// Full path of the library `name` inside `dir`.
pub fn resolve_library(dir: &Path, name: &str) -> PathBuf {
    dir.join(library_file_name(name))
}
