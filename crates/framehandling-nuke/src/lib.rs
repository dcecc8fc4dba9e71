//! Python extension wiring framehandling into a live compositing session.
//!
//! Usage from the host's `menu.py`:
//! ```python
//! import framehandling_nuke as fh
//!
//! menu = nuke.menu('Nodes').addMenu('CQN Tools')
//! for cmd_id, label, shortcut in fh.commands():
//!     menu.addCommand(label, 'import framehandling_nuke as fh; fh.run("{}")'.format(cmd_id), shortcut)
//! ```
//!
//! Host objects are reached through the `nuke` module only while a command
//! runs; nothing is cached between calls.

use log::warn;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict};

use framehandling::config::{AnnotationStyle, SETTINGS_FILE, Settings};
use framehandling::core::commands::{Command, FrameHandler};
use framehandling::entities::keys::{K_FRAME_RANGE, K_FRAME_RANGE_LOCK, K_LABEL, K_NOTE_FONT, K_NOTE_FONT_SIZE};
use framehandling::entities::{AttrValue, Extraction, FrameRange, Host, Node, NodeKind, Viewer};
use framehandling::{Error, paths};

fn host_err(e: PyErr) -> Error {
    Error::host(e.to_string())
}

fn value_err(e: Error) -> PyErr {
    PyErr::new::<PyValueError, _>(e.to_string())
}

/// Python knob value -> AttrValue
fn to_attr(value: &Bound<'_, PyAny>) -> Option<AttrValue> {
    if value.is_instance_of::<PyBool>() {
        return value.extract::<bool>().ok().map(AttrValue::Bool);
    }
    if let Ok(v) = value.extract::<i32>() {
        return Some(AttrValue::Int(v));
    }
    if let Ok(v) = value.extract::<f64>() {
        return Some(AttrValue::Float(v));
    }
    value.extract::<String>().ok().map(AttrValue::Str)
}

/// `nuke.root()` first/last frame
fn root_range(nuke: &Bound<'_, PyModule>) -> framehandling::Result<FrameRange> {
    let read = || -> PyResult<FrameRange> {
        let root = nuke.call_method0("root")?;
        let first = root.get_item("first_frame")?.call_method0("value")?.extract::<f64>()?;
        let last = root.get_item("last_frame")?.call_method0("value")?.extract::<f64>()?;
        Ok(FrameRange::new(first as i32, last as i32))
    };
    read().map_err(|e| Error::host(format!("cannot read root range: {}", e)))
}

/// `nuke.frame()`
fn current_frame(nuke: &Bound<'_, PyModule>) -> i32 {
    nuke.call_method0("frame")
        .and_then(|f| f.extract::<f64>())
        .map(|f| f as i32)
        .unwrap_or_else(|e| {
            warn!("Cannot read current frame: {}", e);
            0
        })
}

struct NukeNode<'py> {
    node: Bound<'py, PyAny>,
    name: String,
}

impl<'py> NukeNode<'py> {
    fn new(node: Bound<'py, PyAny>) -> PyResult<Self> {
        let name = node.call_method0("fullName")?.extract::<String>()?;
        Ok(Self { node, name })
    }
}

impl Node for NukeNode<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> NodeKind {
        match self.node.call_method0("Class").and_then(|c| c.extract::<String>()) {
            Ok(class) => NodeKind::from_class(&class),
            Err(e) => {
                warn!("Cannot read class of {}: {}", self.name, e);
                NodeKind::Other(String::new())
            }
        }
    }

    fn has_knob(&self, name: &str) -> bool {
        self.node
            .call_method0("knobs")
            .and_then(|knobs| knobs.contains(name))
            .unwrap_or(false)
    }

    fn knob(&self, name: &str) -> Option<AttrValue> {
        let value = self.node.get_item(name).ok()?.call_method0("value").ok()?;
        to_attr(&value)
    }

    fn set_knob(&mut self, name: &str, value: AttrValue) -> framehandling::Result<()> {
        let knob = self.node.get_item(name).map_err(host_err)?;
        let result = match value {
            AttrValue::Bool(v) => knob.call_method1("setValue", (v,)),
            AttrValue::Int(v) => knob.call_method1("setValue", (v,)),
            AttrValue::Float(v) => knob.call_method1("setValue", (v,)),
            AttrValue::Str(v) => knob.call_method1("setValue", (v,)),
        };
        result.map(|_| ()).map_err(host_err)
    }
}

struct NukeViewer<'py> {
    nuke: Bound<'py, PyModule>,
    node: Bound<'py, PyAny>,
    /// Root range, shown by the viewer while its own knob is empty
    root: Option<FrameRange>,
}

impl NukeViewer<'_> {
    fn knob_value(&self, name: &str) -> Option<AttrValue> {
        let value = self.node.get_item(name).ok()?.call_method0("value").ok()?;
        to_attr(&value)
    }

    fn set_knob<T>(&self, name: &str, value: T) -> framehandling::Result<()>
    where
        T: for<'a> IntoPyObject<'a>,
    {
        self.node
            .get_item(name)
            .and_then(|knob| knob.call_method1("setValue", (value,)))
            .map(|_| ())
            .map_err(host_err)
    }
}

impl Viewer for NukeViewer<'_> {
    fn frame_range(&self) -> FrameRange {
        let own = match self.knob_value(K_FRAME_RANGE) {
            Some(AttrValue::Str(text)) => text.parse().map_err(|e| warn!("{}", e)).ok(),
            _ => None,
        };
        own.or(self.root).unwrap_or_else(|| {
            // Unreadable: one-frame range at the playhead
            let frame = current_frame(&self.nuke);
            FrameRange::new(frame, frame)
        })
    }

    fn set_frame_range(&mut self, range: FrameRange) -> framehandling::Result<()> {
        self.set_knob(K_FRAME_RANGE, range.to_string())
    }

    fn range_locked(&self) -> bool {
        match self.knob_value(K_FRAME_RANGE_LOCK) {
            Some(AttrValue::Bool(v)) => v,
            Some(AttrValue::Int(v)) => v != 0,
            _ => false,
        }
    }

    fn set_range_lock(&mut self, locked: bool) -> framehandling::Result<()> {
        self.set_knob(K_FRAME_RANGE_LOCK, locked)
    }

    fn current_frame(&self) -> i32 {
        current_frame(&self.nuke)
    }

    fn set_current_frame(&mut self, frame: i32) -> framehandling::Result<()> {
        self.nuke
            .call_method1("frame", (frame,))
            .map(|_| ())
            .map_err(host_err)
    }
}

/// [`Host`] over the `nuke` Python module.
struct NukeHost<'py> {
    nuke: Bound<'py, PyModule>,
}

impl<'py> NukeHost<'py> {
    fn new(py: Python<'py>) -> PyResult<Self> {
        Ok(Self {
            nuke: PyModule::import(py, "nuke")?,
        })
    }

    fn to_node(&self, name: &str) -> Option<NukeNode<'py>> {
        let obj = self.nuke.call_method1("toNode", (name,)).ok()?;
        if obj.is_none() {
            return None;
        }
        NukeNode::new(obj).ok()
    }

    /// `nuke.activeViewer().node()`, None without a viewer
    fn viewer_node(&self) -> Option<Bound<'py, PyAny>> {
        let viewer = self.nuke.call_method0("activeViewer").ok()?;
        if viewer.is_none() {
            return None;
        }
        viewer.call_method0("node").ok()
    }

    fn notify(&self, func: &str, msg: &str) {
        if let Err(e) = self.nuke.call_method1(func, (msg,)) {
            warn!("nuke.{} failed: {} ({})", func, e, msg);
        }
    }
}

impl<'py> Host for NukeHost<'py> {
    fn selected_nodes(&self) -> Vec<String> {
        let nodes = self
            .nuke
            .call_method0("selectedNodes")
            .and_then(|n| n.extract::<Vec<Bound<'py, PyAny>>>());
        match nodes {
            Ok(nodes) => nodes
                .into_iter()
                .filter_map(|n| NukeNode::new(n).ok().map(|n| n.name))
                .collect(),
            Err(e) => {
                warn!("Cannot read selection: {}", e);
                Vec::new()
            }
        }
    }

    fn with_node<R>(&self, name: &str, f: impl FnOnce(&dyn Node) -> R) -> Option<R> {
        let node = self.to_node(name)?;
        Some(f(&node))
    }

    fn with_node_mut<R>(&mut self, name: &str, f: impl FnOnce(&mut dyn Node) -> R) -> Option<R> {
        let mut node = self.to_node(name)?;
        Some(f(&mut node))
    }

    fn has_active_viewer(&self) -> bool {
        self.viewer_node().is_some()
    }

    fn with_active_viewer<R>(&mut self, f: impl FnOnce(&mut dyn Viewer) -> R) -> Option<R> {
        let node = self.viewer_node()?;
        let root = root_range(&self.nuke).map_err(|e| warn!("{}", e)).ok();
        let mut viewer = NukeViewer {
            nuke: self.nuke.clone(),
            node,
            root,
        };
        Some(f(&mut viewer))
    }

    fn root_range(&self) -> framehandling::Result<FrameRange> {
        root_range(&self.nuke)
    }

    fn current_frame(&self) -> i32 {
        current_frame(&self.nuke)
    }

    fn ask_input(&mut self, prompt: &str, default: &str) -> Option<String> {
        let answer = self.nuke.call_method1("getInput", (prompt, default)).ok()?;
        if answer.is_none() {
            return None;
        }
        answer.extract::<String>().ok()
    }

    fn create_annotation(&mut self, label: &str, style: &AnnotationStyle) -> framehandling::Result<String> {
        let kwargs = PyDict::new(self.nuke.py());
        kwargs.set_item("inpanel", false).map_err(host_err)?;
        let obj = self
            .nuke
            .call_method("createNode", ("StickyNote",), Some(&kwargs))
            .map_err(host_err)?;

        let mut node = NukeNode::new(obj).map_err(host_err)?;
        node.set_knob(K_LABEL, AttrValue::Str(label.to_string()))?;
        node.set_knob(K_NOTE_FONT, AttrValue::Str(style.font.clone()))?;
        node.set_knob(K_NOTE_FONT_SIZE, AttrValue::Int(style.font_size))?;
        Ok(node.name)
    }

    fn warning(&mut self, msg: &str) {
        self.notify("warning", msg);
    }

    fn message(&mut self, msg: &str) {
        self.notify("message", msg);
    }
}

/// Settings from the config directory, defaults when absent
fn handler() -> PyResult<FrameHandler> {
    let path_config = paths::PathConfig::from_env_and_cli(None);
    let settings = Settings::load_or_default(&paths::config_file(SETTINGS_FILE, &path_config));
    FrameHandler::new(settings).map_err(value_err)
}

fn run_command(py: Python<'_>, command: Command) -> PyResult<bool> {
    // Init logging (only once)
    let _ = env_logger::try_init();

    let handler = handler()?;
    let mut host = NukeHost::new(py)?;
    Ok(handler.run(&mut host, command))
}

/// Run a command by id (see `commands()`).
///
/// Returns:
///     True when the command succeeded; failures are reported through the host.
#[pyfunction]
fn run(py: Python<'_>, command_id: &str) -> PyResult<bool> {
    let command = Command::ALL
        .into_iter()
        .find(|c| c.id() == command_id)
        .ok_or_else(|| PyErr::new::<PyValueError, _>(format!("unknown command: {}", command_id)))?;
    run_command(py, command)
}

/// Set the reference frame on selected nodes (annotate when nothing is selected).
///
/// Args:
///     from_user: Prompt for the frame instead of using the current one.
#[pyfunction]
#[pyo3(signature = (from_user = false))]
fn change_reference_frame(py: Python<'_>, from_user: bool) -> PyResult<bool> {
    let command = if from_user {
        Command::SetToUserFrame
    } else {
        Command::SetToCurrentFrame
    };
    run_command(py, command)
}

/// Go to the selected node's reference frame, or set the viewer in-out.
#[pyfunction]
fn go_to_reference_frame(py: Python<'_>) -> PyResult<bool> {
    run_command(py, Command::GoToReference)
}

/// Clear the active viewer's in-out.
#[pyfunction]
fn clear_viewer_range(py: Python<'_>) -> PyResult<bool> {
    run_command(py, Command::ClearInOut)
}

/// Parse a label: ("range", first, last), ("frame", frame, None) or ("none", None, None).
#[pyfunction]
fn parse_label(text: &str) -> PyResult<(&'static str, Option<i32>, Option<i32>)> {
    let parsed = match handler()?.parser().parse(text) {
        Extraction::Range(range) => ("range", Some(range.first), Some(range.last)),
        Extraction::SingleFrame(frame) => ("frame", Some(frame), None),
        Extraction::NoData => ("none", None, None),
    };
    Ok(parsed)
}

/// Menu entries as (id, label, shortcut), shortcuts with settings overrides.
#[pyfunction]
fn commands() -> PyResult<Vec<(String, String, String)>> {
    let handler = handler()?;
    Ok(Command::ALL
        .iter()
        .map(|c| {
            (
                c.id().to_string(),
                c.label().to_string(),
                c.shortcut(handler.settings()).to_string(),
            )
        })
        .collect())
}

/// Get framehandling version string.
#[pyfunction]
fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Python module definition.
#[pymodule]
fn framehandling_nuke(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(run, m)?)?;
    m.add_function(wrap_pyfunction!(change_reference_frame, m)?)?;
    m.add_function(wrap_pyfunction!(go_to_reference_frame, m)?)?;
    m.add_function(wrap_pyfunction!(clear_viewer_range, m)?)?;
    m.add_function(wrap_pyfunction!(parse_label, m)?)?;
    m.add_function(wrap_pyfunction!(commands, m)?)?;
    m.add_function(wrap_pyfunction!(version, m)?)?;
    Ok(())
}
