//! Python bindings for the base64 vix-ffi native library.
//!
//! This crate provides the `vix_base64_py` extension module using PyO3. The
//! native library is located at first use; the module's own directory is
//! searched after `VIX_LIB_PATH`.

use pyo3::exceptions::{PyRuntimeError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyByteArray, PyBytes, PyMemoryView, PyString};
use std::path::{Path, PathBuf};
use vix_base64::{Base64Library, Error, LoaderConfig, DEFAULT_OUT_CAPACITY};

const MODULE_NAME: &str = "vix_base64_py";

fn to_py_err(e: Error) -> PyErr {
    match e {
        Error::InvalidArgument(_) => PyValueError::new_err(e.to_string()),
        _ => PyRuntimeError::new_err(e.to_string()),
    }
}

/// Directory holding this extension module, if Python knows it.
fn module_dir(py: Python<'_>) -> Option<PathBuf> {
    let file: PathBuf = py
        .import(MODULE_NAME)
        .ok()?
        .getattr("__file__")
        .ok()?
        .extract()
        .ok()?;
    file.parent().map(Path::to_path_buf)
}

fn library(py: Python<'_>) -> PyResult<&'static Base64Library> {
    if let Some(lib) = vix_base64::loaded() {
        return Ok(lib);
    }
    let mut config = LoaderConfig::default();
    if let Some(dir) = module_dir(py) {
        config = config.with_module_dir(dir);
    }
    vix_base64::init(&config).map_err(to_py_err)
}

fn bytes_like(data: &Bound<'_, PyAny>) -> PyResult<Vec<u8>> {
    if let Ok(bytes) = data.downcast::<PyBytes>() {
        return Ok(bytes.as_bytes().to_vec());
    }
    if let Ok(array) = data.downcast::<PyByteArray>() {
        return Ok(array.to_vec());
    }
    if data.is_instance_of::<PyMemoryView>() {
        // Raw bytes of any item format, C order
        let raw = data.call_method0("tobytes")?;
        return Ok(raw.downcast::<PyBytes>()?.as_bytes().to_vec());
    }
    Err(PyTypeError::new_err("data must be bytes-like"))
}

/// Returns the native library version.
#[pyfunction]
fn version(py: Python<'_>) -> PyResult<String> {
    let lib = library(py)?;
    lib.api().version().map_err(to_py_err)
}

/// Encodes bytes-like `data` to base64 text.
#[pyfunction]
#[pyo3(signature = (data, *, out_cap = DEFAULT_OUT_CAPACITY))]
fn encode(py: Python<'_>, data: &Bound<'_, PyAny>, out_cap: usize) -> PyResult<String> {
    let input = bytes_like(data)?;
    let lib = library(py)?;
    py.allow_threads(|| lib.api().encode(&input, out_cap))
        .map_err(to_py_err)
}

/// Decodes base64 `text` to bytes.
#[pyfunction]
#[pyo3(signature = (text, *, out_cap = DEFAULT_OUT_CAPACITY))]
fn decode<'py>(
    py: Python<'py>,
    text: &Bound<'py, PyAny>,
    out_cap: usize,
) -> PyResult<Bound<'py, PyBytes>> {
    let text = text
        .downcast::<PyString>()
        .map_err(|_| PyTypeError::new_err("text must be str"))?;
    let input = text.to_str()?.to_owned();
    let lib = library(py)?;
    let out = py
        .allow_threads(|| lib.api().decode(&input, out_cap))
        .map_err(to_py_err)?;
    Ok(PyBytes::new(py, &out))
}

#[pymodule]
fn vix_base64_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("DEFAULT_OUT_CAPACITY", DEFAULT_OUT_CAPACITY)?;
    m.add_function(wrap_pyfunction!(version, m)?)?;
    m.add_function(wrap_pyfunction!(encode, m)?)?;
    m.add_function(wrap_pyfunction!(decode, m)?)?;
    Ok(())
}
