// ── Application shell state ──
//
// Navigation state shared by the front ends: which section is showing,
// whether a detail screen is open (and in view or edit mode), and any
// delete waiting for confirmation. Transitions are pure; each one that
// needs the server returns the `Command` to run, and `on_result` folds
// the outcome back in as a `Notification`.

use crate::command::{Command, CommandResult};
use crate::error::CoreError;
use crate::form::FormValues;
use crate::kind::ResourceKind;
use crate::notification::Notification;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailMode {
    #[default]
    View,
    Edit,
}

/// The detail screen currently open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDetail {
    pub kind: ResourceKind,
    pub key: String,
    pub mode: DetailMode,
}

/// A delete waiting for the user's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub kind: ResourceKind,
    pub key: String,
    pub prompt: String,
}

impl PendingDelete {
    pub fn new(kind: ResourceKind, key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            prompt: format!("Are you sure you want to delete {}: {key}?", kind.label()),
            kind,
            key,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shell {
    section: ResourceKind,
    detail: Option<OpenDetail>,
    pending_delete: Option<PendingDelete>,
}

impl Shell {
    pub fn new(section: ResourceKind) -> Self {
        Self {
            section,
            ..Self::default()
        }
    }

    pub fn section(&self) -> ResourceKind {
        self.section
    }

    pub fn detail(&self) -> Option<&OpenDetail> {
        self.detail.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.detail.as_ref().is_some_and(|d| d.mode == DetailMode::Edit)
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Switch section. Closes any open detail and pending delete.
    pub fn show_section(&mut self, kind: ResourceKind) -> Command {
        self.section = kind;
        self.detail = None;
        self.pending_delete = None;
        Command::List(kind)
    }

    /// Re-list the current section.
    pub fn refresh(&self) -> Command {
        Command::List(self.section)
    }

    /// Open the detail screen of `key` in the current section, in view mode.
    pub fn open_detail(&mut self, key: impl Into<String>) -> Command {
        let key = key.into();
        self.detail = Some(OpenDetail {
            kind: self.section,
            key: key.clone(),
            mode: DetailMode::View,
        });
        Command::Get {
            kind: self.section,
            key,
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Enter edit mode. Only possible with a detail screen open.
    pub fn begin_edit(&mut self) -> bool {
        match &mut self.detail {
            Some(detail) => {
                detail.mode = DetailMode::Edit;
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        if let Some(detail) = &mut self.detail {
            detail.mode = DetailMode::View;
        }
    }

    /// Turn a submitted form into a create (no detail open) or an update
    /// (detail in edit mode). A detail in view mode has nothing to submit.
    pub fn submit(&self, form: FormValues) -> Option<Command> {
        match &self.detail {
            None => Some(Command::Create {
                kind: self.section,
                form,
            }),
            Some(detail) if detail.mode == DetailMode::Edit => Some(Command::Update {
                kind: detail.kind,
                key: detail.key.clone(),
                form,
            }),
            Some(_) => None,
        }
    }

    // ── Delete confirmation ──────────────────────────────────────────

    pub fn request_delete(&mut self, kind: ResourceKind, key: impl Into<String>) -> &PendingDelete {
        self.pending_delete.insert(PendingDelete::new(kind, key))
    }

    /// Confirm the pending delete, yielding the command to run.
    pub fn confirm_delete(&mut self) -> Option<Command> {
        self.pending_delete
            .take()
            .map(|p| Command::Delete { kind: p.kind, key: p.key })
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    // ── Results ──────────────────────────────────────────────────────

    /// Fold a command outcome into the shell state.
    ///
    /// Plain reads produce no notification; mutations and failures do.
    pub fn on_result(&mut self, result: &Result<CommandResult, CoreError>) -> Option<Notification> {
        match result {
            Ok(CommandResult::Saved { kind, key, created, .. }) => {
                if *created {
                    Some(Notification::success(format!("{} {key} created", kind.label())))
                } else {
                    self.cancel_edit();
                    Some(Notification::success(format!("{} {key} updated", kind.label())))
                }
            }
            Ok(CommandResult::Deleted { kind, key, .. }) => {
                if self.detail.as_ref().is_some_and(|d| d.kind == *kind && d.key == *key) {
                    self.detail = None;
                }
                Some(Notification::success(format!("{} {key} deleted", kind.label())))
            }
            Ok(CommandResult::List(list)) => list
                .error
                .as_ref()
                .map(|e| Notification::error(format!("Failed to load {}: {e}", list.kind.title()))),
            Ok(CommandResult::Detail { .. } | CommandResult::Options { .. }) => None,
            Err(e) => Some(Notification::error(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ListView;

    fn empty_list(kind: ResourceKind) -> ListView {
        ListView {
            kind,
            columns: vec![],
            rows: vec![],
            error: None,
        }
    }

    #[test]
    fn switching_section_lists_it_and_closes_detail() {
        let mut shell = Shell::default();
        shell.open_detail("site1");
        assert_eq!(shell.show_section(ResourceKind::Gnb), Command::List(ResourceKind::Gnb));
        assert_eq!(shell.section(), ResourceKind::Gnb);
        assert!(shell.detail().is_none());
    }

    #[test]
    fn edit_mode_only_from_open_detail() {
        let mut shell = Shell::new(ResourceKind::Upf);
        assert!(!shell.begin_edit());

        shell.open_detail("upf.lab");
        assert!(!shell.is_editing());
        assert!(shell.begin_edit());
        assert!(shell.is_editing());
        shell.cancel_edit();
        assert_eq!(shell.detail().map(|d| d.mode), Some(DetailMode::View));
    }

    #[test]
    fn submit_creates_or_updates() {
        let mut shell = Shell::new(ResourceKind::Gnb);
        let form = FormValues::new();
        assert!(matches!(shell.submit(form.clone()), Some(Command::Create { .. })));

        shell.open_detail("gnb1");
        assert_eq!(shell.submit(form.clone()), None);

        shell.begin_edit();
        assert_eq!(
            shell.submit(form.clone()),
            Some(Command::Update {
                kind: ResourceKind::Gnb,
                key: "gnb1".into(),
                form
            })
        );
    }

    #[test]
    fn successful_update_leaves_edit_mode() {
        let mut shell = Shell::new(ResourceKind::Gnb);
        shell.open_detail("gnb1");
        shell.begin_edit();

        let failed: Result<CommandResult, CoreError> = Err(CoreError::invalid("TAC must be between 1 and 16777215"));
        let note = shell.on_result(&failed);
        assert!(note.is_some_and(|n| n.is_error()));
        assert!(shell.is_editing());

        let saved = Ok(CommandResult::Saved {
            kind: ResourceKind::Gnb,
            key: "gnb1".into(),
            created: false,
            list: empty_list(ResourceKind::Gnb),
        });
        let note = shell.on_result(&saved);
        assert_eq!(note, Some(Notification::success("gNB gnb1 updated")));
        assert!(!shell.is_editing());
    }

    #[test]
    fn delete_waits_for_confirmation() {
        let mut shell = Shell::new(ResourceKind::NetworkSlice);
        let prompt = shell.request_delete(ResourceKind::NetworkSlice, "slice-42").prompt.clone();
        assert_eq!(prompt, "Are you sure you want to delete Network Slice: slice-42?");

        shell.cancel_delete();
        assert_eq!(shell.confirm_delete(), None);

        shell.request_delete(ResourceKind::NetworkSlice, "slice-42");
        assert_eq!(
            shell.confirm_delete(),
            Some(Command::Delete {
                kind: ResourceKind::NetworkSlice,
                key: "slice-42".into()
            })
        );
        assert!(shell.pending_delete().is_none());
    }

    #[test]
    fn deleting_the_open_record_closes_it() {
        let mut shell = Shell::new(ResourceKind::K4Key);
        shell.open_detail("5");
        let deleted = Ok(CommandResult::Deleted {
            kind: ResourceKind::K4Key,
            key: "5".into(),
            list: empty_list(ResourceKind::K4Key),
        });
        assert_eq!(
            shell.on_result(&deleted),
            Some(Notification::success("K4 Key 5 deleted"))
        );
        assert!(shell.detail().is_none());
    }
}
