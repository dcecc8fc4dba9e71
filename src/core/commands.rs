//! Menu commands: set reference, go to reference, clear in-out.
//!
//! Each command runs to completion against a [`Host`]. Failures come back as
//! [`Error`]; [`FrameHandler::run`] turns them into host notifications so a
//! menu binding only has to call `run`. Mutations happen last, after every
//! check passed.

use log::{debug, info, warn};

use crate::config::Settings;
use crate::entities::{Extraction, FrameRange, Host};
use crate::error::{Error, Result};

use super::extract::extract_range;
use super::label::LabelParser;
use super::resolver::ReferenceResolver;
use super::viewer_sync;

/// Prompt shown when asking for a frame
pub const FRAME_PROMPT: &str = " > set frame to";

/// Menu commands offered to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    SetToCurrentFrame,
    SetToUserFrame,
    GoToReference,
    ClearInOut,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::SetToCurrentFrame,
        Command::SetToUserFrame,
        Command::GoToReference,
        Command::ClearInOut,
    ];

    /// Stable id, used as settings key
    pub fn id(&self) -> &'static str {
        match self {
            Command::SetToCurrentFrame => "set_to_current_frame",
            Command::SetToUserFrame => "set_to_user_frame",
            Command::GoToReference => "go_to_reference",
            Command::ClearInOut => "clear_in_out",
        }
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            Command::SetToCurrentFrame => "Set to current frame",
            Command::SetToUserFrame => "Set to a specific frame",
            Command::GoToReference => "Go to Frame | Set in-out",
            Command::ClearInOut => "Clear in-out",
        }
    }

    pub fn default_shortcut(&self) -> &'static str {
        match self {
            Command::SetToCurrentFrame => "alt+shift+f",
            Command::SetToUserFrame => "alt+shift+g",
            Command::GoToReference => "shift+g",
            Command::ClearInOut => "alt+c",
        }
    }

    /// Shortcut with settings override applied
    pub fn shortcut<'a>(&self, settings: &'a Settings) -> &'a str {
        settings
            .shortcuts
            .get(self.id())
            .map(String::as_str)
            .unwrap_or(self.default_shortcut())
    }
}

/// Where "set reference" takes its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    CurrentFrame,
    UserInput,
}

/// Result of "set reference".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetOutcome {
    /// Reference knobs written on this many selected nodes
    Updated(usize),
    /// Nothing selected: annotation nodes created (value, then custom range if any)
    Annotated(Vec<String>),
    /// The user cancelled or typed something unusable
    Cancelled,
}

/// Result of "go to reference".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoToOutcome {
    Range(FrameRange),
    Frame(i32),
}

/// What the selected node pointed at, before the viewer is touched.
enum Target {
    Extracted(Extraction),
    Reference(Option<i32>),
}

pub struct FrameHandler {
    settings: Settings,
    resolver: ReferenceResolver,
    parser: LabelParser,
}

impl FrameHandler {
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let parser = LabelParser::from_settings(&settings)?;
        let resolver = ReferenceResolver::new(settings.reference_knobs.iter().cloned());
        Ok(Self {
            settings,
            resolver,
            parser,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn parser(&self) -> &LabelParser {
        &self.parser
    }

    pub fn resolver(&self) -> &ReferenceResolver {
        &self.resolver
    }

    /// Run a menu command, reporting failures to the host.
    /// Returns false when the command failed.
    pub fn run<H: Host>(&self, host: &mut H, command: Command) -> bool {
        debug!("Running command: {}", command.id());
        let result = match command {
            Command::SetToCurrentFrame => self.set_reference(host, ValueSource::CurrentFrame).map(|_| ()),
            Command::SetToUserFrame => self.set_reference(host, ValueSource::UserInput).map(|_| ()),
            Command::GoToReference => self.go_to_reference(host).map(|_| ()),
            Command::ClearInOut => self.clear_in_out(host),
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                report(host, &e);
                false
            }
        }
    }

    /// Frame value from the playhead or from a prompt.
    ///
    /// None when the prompt was cancelled, left empty, or answered with a
    /// non-integer (after telling the user; re-prompts when
    /// `retry_invalid_input` is set).
    pub fn resolve_value<H: Host>(&self, host: &mut H, source: ValueSource) -> Option<i32> {
        let current = host.current_frame();
        if source == ValueSource::CurrentFrame {
            return Some(current);
        }
        loop {
            let text = host.ask_input(FRAME_PROMPT, &current.to_string())?;
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            match text.parse::<i32>() {
                Ok(value) => return Some(value),
                Err(e) => {
                    let err = Error::InvalidInput(e.to_string());
                    report(host, &err);
                    if !self.settings.retry_invalid_input {
                        return None;
                    }
                }
            }
        }
    }

    /// Write the reference frame on the selection, or leave annotations when
    /// nothing is selected.
    pub fn set_reference<H: Host>(&self, host: &mut H, source: ValueSource) -> Result<SetOutcome> {
        if !host.has_active_viewer() {
            return Err(Error::NoActiveViewer);
        }
        let selection = host.selected_nodes();
        let Some(value) = self.resolve_value(host, source) else {
            return Ok(SetOutcome::Cancelled);
        };

        if selection.is_empty() {
            return self.annotate(host, value).map(SetOutcome::Annotated);
        }

        let mut updated = 0;
        for name in &selection {
            let written = host
                .with_node_mut(name, |node| self.resolver.write_node(node, value))
                .ok_or_else(|| Error::UnknownNode(name.clone()))??;
            match written {
                Some(_) => updated += 1,
                None => debug!("{} has no reference knob, skipped", name),
            }
        }
        Ok(SetOutcome::Updated(updated))
    }

    /// Annotation with the value, plus one with the viewer range when it
    /// differs from the root range.
    fn annotate<H: Host>(&self, host: &mut H, value: i32) -> Result<Vec<String>> {
        let root = host.root_range()?;
        let custom = host
            .with_active_viewer(|viewer| {
                viewer_sync::is_custom_range(viewer, root).then(|| viewer.frame_range())
            })
            .ok_or(Error::NoActiveViewer)?;

        let style = &self.settings.annotation;
        let mut created = vec![host.create_annotation(&value.to_string(), style)?];
        if let Some(range) = custom {
            created.push(host.create_annotation(&range.to_string(), style)?);
        }
        info!("Created reference annotations: {:?}", created);
        Ok(created)
    }

    /// Move the active viewer to what the single selected node points at.
    pub fn go_to_reference<H: Host>(&self, host: &mut H) -> Result<GoToOutcome> {
        if !host.has_active_viewer() {
            return Err(Error::NoActiveViewer);
        }
        let name = single_selection(host)?;

        let target = host
            .with_node(&name, |node| {
                if node.kind().is_range_bearing() {
                    Target::Extracted(extract_range(node, &self.parser))
                } else {
                    Target::Reference(self.resolver.read_reference(node))
                }
            })
            .ok_or_else(|| Error::UnknownNode(name.clone()))?;

        let outcome = match target {
            Target::Extracted(Extraction::Range(range)) => GoToOutcome::Range(range),
            Target::Extracted(Extraction::SingleFrame(frame)) => GoToOutcome::Frame(frame),
            Target::Extracted(Extraction::NoData) => return Err(Error::NoFrameData(name)),
            Target::Reference(Some(frame)) => GoToOutcome::Frame(frame),
            Target::Reference(None) => return Err(Error::NoReferenceKnob(name)),
        };

        host.with_active_viewer(|viewer| match outcome {
            GoToOutcome::Range(range) => viewer_sync::apply_range(viewer, range),
            GoToOutcome::Frame(frame) => viewer_sync::apply_single_frame(viewer, frame),
        })
        .ok_or(Error::NoActiveViewer)??;

        info!("{} -> {:?}", name, outcome);
        Ok(outcome)
    }

    /// Drop the viewer's custom in/out, back to the root range.
    pub fn clear_in_out<H: Host>(&self, host: &mut H) -> Result<()> {
        let root = host.root_range()?;
        host.with_active_viewer(|viewer| viewer_sync::reset_range(viewer, root))
            .ok_or(Error::NoActiveViewer)?
    }
}

/// Name of the only selected node
fn single_selection<H: Host>(host: &H) -> Result<String> {
    let mut selection = host.selected_nodes();
    match selection.len() {
        0 => Err(Error::NoSelection),
        1 => Ok(selection.remove(0)),
        n => Err(Error::AmbiguousSelection(n)),
    }
}

/// Surface an error the way the host expects it
fn report<H: Host>(host: &mut H, err: &Error) {
    let msg = err.to_string();
    if err.is_blocking() {
        host.message(&msg);
    } else {
        warn!(" >>> {}", msg);
        host.warning(&format!(" >>> {}", msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Node, NodeKind, Script, ScriptNode};

    fn handler() -> FrameHandler {
        FrameHandler::new(Settings::default()).unwrap()
    }

    fn script() -> Script {
        Script::new(FrameRange::new(1, 100))
    }

    fn viewer_state(script: &Script) -> (FrameRange, bool, i32) {
        let v = script.active_viewer().unwrap();
        (v.frame_range, v.frame_range_lock, v.current_frame)
    }

    #[test]
    fn test_set_reference_on_selection() {
        let mut s = script();
        s.add_node(ScriptNode::new("Hold1", NodeKind::from_class("FrameHold")).with("ref_frame", 10).with("fframe", 20));
        s.add_node(ScriptNode::new("Blur1", NodeKind::from_class("Blur")));
        s.select(&["Hold1", "Blur1"]);
        s.active_viewer_mut().unwrap().current_frame = 42;

        let outcome = handler().set_reference(&mut s, ValueSource::CurrentFrame).unwrap();
        assert_eq!(outcome, SetOutcome::Updated(1));
        let hold = s.node("Hold1").unwrap();
        assert_eq!(hold.knob_frame("ref_frame"), Some(42));
        assert_eq!(hold.knob_frame("fframe"), Some(20));
        assert!(s.warnings().is_empty());
    }

    #[test]
    fn test_set_reference_from_user() {
        let mut s = script();
        s.add_node(ScriptNode::new("Hold1", NodeKind::from_class("FrameHold")).with("first_frame", 1));
        s.select(&["Hold1"]);
        s.push_input(Some(" 1050 ".into()));

        let h = handler();
        assert_eq!(h.set_reference(&mut s, ValueSource::UserInput).unwrap(), SetOutcome::Updated(1));
        assert_eq!(h.resolver().read_reference(s.node("Hold1").unwrap()), Some(1050));
    }

    #[test]
    fn test_zero_is_a_valid_value() {
        let mut s = script();
        s.add_node(ScriptNode::new("Hold1", NodeKind::from_class("FrameHold")).with("first_frame", 1));
        s.select(&["Hold1"]);
        s.push_input(Some("0".into()));

        assert_eq!(handler().set_reference(&mut s, ValueSource::UserInput).unwrap(), SetOutcome::Updated(1));
        assert_eq!(s.node("Hold1").unwrap().knob_frame("first_frame"), Some(0));
    }

    #[test]
    fn test_invalid_input_without_retry() {
        let mut s = script();
        s.add_node(ScriptNode::new("Hold1", NodeKind::from_class("FrameHold")).with("ref_frame", 7));
        s.select(&["Hold1"]);
        s.push_input(Some("ten-fifty".into()));
        s.push_input(Some("1050".into()));

        let outcome = handler().set_reference(&mut s, ValueSource::UserInput).unwrap();
        assert_eq!(outcome, SetOutcome::Cancelled);
        assert_eq!(s.messages().len(), 1);
        assert!(s.messages()[0].contains("integer value"));
        assert_eq!(s.node("Hold1").unwrap().knob_frame("ref_frame"), Some(7));
    }

    #[test]
    fn test_invalid_input_with_retry() {
        let mut settings = Settings::default();
        settings.retry_invalid_input = true;
        let h = FrameHandler::new(settings).unwrap();

        let mut s = script();
        s.add_node(ScriptNode::new("Hold1", NodeKind::from_class("FrameHold")).with("ref_frame", 7));
        s.select(&["Hold1"]);
        s.push_input(Some("abc".into()));
        s.push_input(Some("10.5".into()));
        s.push_input(Some("1050".into()));

        assert_eq!(h.set_reference(&mut s, ValueSource::UserInput).unwrap(), SetOutcome::Updated(1));
        assert_eq!(s.messages().len(), 2);
        assert_eq!(s.node("Hold1").unwrap().knob_frame("ref_frame"), Some(1050));
    }

    #[test]
    fn test_cancelled_prompt_changes_nothing() {
        let mut s = script();
        assert_eq!(handler().set_reference(&mut s, ValueSource::UserInput).unwrap(), SetOutcome::Cancelled);
        assert!(s.nodes.is_empty());
        assert!(s.messages().is_empty());
    }

    #[test]
    fn test_empty_selection_creates_annotation() {
        let mut s = script();
        s.active_viewer_mut().unwrap().current_frame = 57;

        let outcome = handler().set_reference(&mut s, ValueSource::CurrentFrame).unwrap();
        assert_eq!(outcome, SetOutcome::Annotated(vec!["StickyNote1".into()]));
        assert_eq!(s.node("StickyNote1").unwrap().label().as_deref(), Some("57"));
    }

    #[test]
    fn test_empty_selection_keeps_custom_range() {
        let mut s = script();
        {
            let v = s.active_viewer_mut().unwrap();
            v.frame_range = FrameRange::new(10, 50);
            v.current_frame = 12;
        }

        let outcome = handler().set_reference(&mut s, ValueSource::CurrentFrame).unwrap();
        assert_eq!(outcome, SetOutcome::Annotated(vec!["StickyNote1".into(), "StickyNote2".into()]));
        assert_eq!(s.node("StickyNote1").unwrap().label().as_deref(), Some("12"));
        assert_eq!(s.node("StickyNote2").unwrap().label().as_deref(), Some("10-50"));
    }

    #[test]
    fn test_go_to_sticky_range_with_handle() {
        let mut s = script();
        s.add_node(ScriptNode::new("StickyNote1", NodeKind::StickyNote).with("label", "0900 - 1050 +10"));
        s.select(&["StickyNote1"]);

        let outcome = handler().go_to_reference(&mut s).unwrap();
        assert_eq!(outcome, GoToOutcome::Range(FrameRange::new(890, 1060)));
        assert_eq!(viewer_state(&s), (FrameRange::new(890, 1060), true, 890));
    }

    #[test]
    fn test_go_to_sticky_single_frame_clears_lock() {
        let mut s = script();
        s.add_node(ScriptNode::new("StickyNote1", NodeKind::StickyNote).with("label", "plate v003 1204"));
        s.select(&["StickyNote1"]);
        s.active_viewer_mut().unwrap().frame_range_lock = true;

        let outcome = handler().go_to_reference(&mut s).unwrap();
        assert_eq!(outcome, GoToOutcome::Frame(1204));
        let (_, locked, frame) = viewer_state(&s);
        assert!(!locked);
        assert_eq!(frame, 1204);
    }

    #[test]
    fn test_go_to_read_range() {
        let mut s = script();
        s.add_node(ScriptNode::new("Read1", NodeKind::Read).with("first", 1001).with("last", 1100));
        s.select(&["Read1"]);

        handler().go_to_reference(&mut s).unwrap();
        assert_eq!(viewer_state(&s), (FrameRange::new(1001, 1100), true, 1001));
    }

    #[test]
    fn test_go_to_plain_reference_knob() {
        let mut s = script();
        s.add_node(ScriptNode::new("Hold1", NodeKind::from_class("FrameHold")).with("first_frame", 1050.0));
        s.select(&["Hold1"]);
        s.active_viewer_mut().unwrap().frame_range_lock = true;

        assert_eq!(handler().go_to_reference(&mut s).unwrap(), GoToOutcome::Frame(1050));
        assert_eq!(viewer_state(&s), (FrameRange::new(1, 100), false, 1050));
    }

    #[test]
    fn test_go_to_unparseable_sticky_warns() {
        let mut s = script();
        s.add_node(ScriptNode::new("StickyNote1", NodeKind::StickyNote).with("label", "ask the client"));
        s.select(&["StickyNote1"]);
        let before = viewer_state(&s);

        assert!(!handler().run(&mut s, Command::GoToReference));
        assert_eq!(s.warnings().len(), 1);
        assert!(s.warnings()[0].contains("StickyNote1"));
        assert_eq!(viewer_state(&s), before);
    }

    #[test]
    fn test_go_to_node_without_reference() {
        let mut s = script();
        s.add_node(ScriptNode::new("Blur1", NodeKind::from_class("Blur")));
        s.select(&["Blur1"]);
        assert!(matches!(handler().go_to_reference(&mut s), Err(Error::NoReferenceKnob(_))));
    }

    #[test]
    fn test_go_to_selection_errors() {
        let mut s = script();
        s.add_node(ScriptNode::new("Read1", NodeKind::Read).with("first", 1).with("last", 2));
        s.add_node(ScriptNode::new("Read2", NodeKind::Read).with("first", 1).with("last", 2));

        assert!(matches!(handler().go_to_reference(&mut s), Err(Error::NoSelection)));

        s.select(&["Read1", "Read2"]);
        assert!(matches!(handler().go_to_reference(&mut s), Err(Error::AmbiguousSelection(2))));

        assert!(!handler().run(&mut s, Command::GoToReference));
        assert!(s.warnings()[0].contains("Select only one node"));
    }

    #[test]
    fn test_no_active_viewer() {
        let mut s = script();
        s.active_viewer = None;
        s.add_node(ScriptNode::new("Read1", NodeKind::Read).with("first", 1).with("last", 2));
        s.select(&["Read1"]);

        let h = handler();
        assert!(matches!(h.go_to_reference(&mut s), Err(Error::NoActiveViewer)));
        assert!(matches!(h.set_reference(&mut s, ValueSource::CurrentFrame), Err(Error::NoActiveViewer)));
        assert!(!h.run(&mut s, Command::ClearInOut));
        assert_eq!(s.warnings().len(), 1);
    }

    #[test]
    fn test_clear_in_out_resets_to_root() {
        let mut s = script();
        s.add_node(ScriptNode::new("Read1", NodeKind::Read).with("first", 1001).with("last", 1100));
        s.select(&["Read1"]);

        let h = handler();
        assert!(h.run(&mut s, Command::GoToReference));
        assert!(h.run(&mut s, Command::ClearInOut));
        assert_eq!(viewer_state(&s), (FrameRange::new(1, 100), false, 1001));
    }

    /// Script whose root range cannot be read
    struct NoRoot(Script);

    impl Host for NoRoot {
        fn selected_nodes(&self) -> Vec<String> {
            self.0.selected_nodes()
        }

        fn with_node<R>(&self, name: &str, f: impl FnOnce(&dyn Node) -> R) -> Option<R> {
            self.0.with_node(name, f)
        }

        fn with_node_mut<R>(&mut self, name: &str, f: impl FnOnce(&mut dyn Node) -> R) -> Option<R> {
            self.0.with_node_mut(name, f)
        }

        fn has_active_viewer(&self) -> bool {
            self.0.has_active_viewer()
        }

        fn with_active_viewer<R>(&mut self, f: impl FnOnce(&mut dyn crate::entities::Viewer) -> R) -> Option<R> {
            self.0.with_active_viewer(f)
        }

        fn root_range(&self) -> Result<FrameRange> {
            Err(Error::host("root is gone"))
        }

        fn current_frame(&self) -> i32 {
            self.0.current_frame()
        }

        fn ask_input(&mut self, prompt: &str, default: &str) -> Option<String> {
            self.0.ask_input(prompt, default)
        }

        fn create_annotation(&mut self, label: &str, style: &crate::config::AnnotationStyle) -> Result<String> {
            self.0.create_annotation(label, style)
        }

        fn warning(&mut self, msg: &str) {
            self.0.warning(msg)
        }

        fn message(&mut self, msg: &str) {
            self.0.message(msg)
        }
    }

    #[test]
    fn test_unreadable_root_range_aborts() {
        let mut s = script();
        s.active_viewer_mut().unwrap().frame_range = FrameRange::new(10, 50);
        let mut host = NoRoot(s);

        let h = handler();
        assert!(!h.run(&mut host, Command::SetToCurrentFrame));
        assert!(!h.run(&mut host, Command::ClearInOut));

        let s = host.0;
        assert!(s.nodes.is_empty());
        assert_eq!(s.warnings().len(), 2);
        assert!(s.warnings()[0].contains("root is gone"));
        assert_eq!(s.active_viewer().unwrap().frame_range, FrameRange::new(10, 50));
    }

    #[test]
    fn test_command_metadata() {
        let mut settings = Settings::default();
        assert_eq!(Command::GoToReference.shortcut(&settings), "shift+g");

        settings.shortcuts.insert("go_to_reference".into(), "ctrl+g".into());
        assert_eq!(Command::GoToReference.shortcut(&settings), "ctrl+g");
        assert_eq!(Command::ClearInOut.shortcut(&settings), "alt+c");
        assert_eq!(Command::ALL.len(), 4);
    }
}
