//! Filter control records.
//!
//! # Responsibility
//! - Describe the read-only view of one "album type" checkbox.
//! - Provide an owned record a UI host can hand over as JSON.
//!
//! # Invariants
//! - Controls are only read by core; nothing here mutates host state.
//! - Names are carried verbatim; no validation or normalization.

use crate::model::album_type::AlbumType;
use crate::query::builder::ControlSource;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

/// Read-only view of one type filter checkbox.
pub trait FilterControl {
    /// Album type identifier carried by the control.
    fn name(&self) -> &str;
    /// Whether the control is currently checked.
    fn is_checked(&self) -> bool;
}

impl<T: FilterControl + ?Sized> FilterControl for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_checked(&self) -> bool {
        (**self).is_checked()
    }
}

impl<S: AsRef<str>> FilterControl for (S, bool) {
    fn name(&self) -> &str {
        self.0.as_ref()
    }

    fn is_checked(&self) -> bool {
        self.1
    }
}

/// Owned snapshot of one type filter checkbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFilterControl {
    pub name: String,
    pub checked: bool,
}

impl TypeFilterControl {
    pub fn new(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            checked,
        }
    }

    pub fn checked(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    pub fn unchecked(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }
}

impl FilterControl for TypeFilterControl {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_checked(&self) -> bool {
        self.checked
    }
}

/// Initial panel state: one checked control per album type, canonical order.
pub fn default_type_controls() -> Vec<TypeFilterControl> {
    AlbumType::ALL
        .into_iter()
        .map(|kind| TypeFilterControl::checked(kind.as_str()))
        .collect()
}

/// Control selection backed by an owned list.
///
/// Stands in for a live document when the caller already holds a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryControls {
    controls: Vec<TypeFilterControl>,
}

impl InMemoryControls {
    pub fn new(controls: Vec<TypeFilterControl>) -> Self {
        Self { controls }
    }

    /// Sets the checked state of every control named `name`.
    ///
    /// Returns how many controls were touched.
    pub fn set_checked(&mut self, name: &str, checked: bool) -> usize {
        let mut touched = 0;
        for control in self.controls.iter_mut().filter(|c| c.name == name) {
            control.checked = checked;
            touched += 1;
        }
        touched
    }

    pub fn controls(&self) -> &[TypeFilterControl] {
        &self.controls
    }
}

impl ControlSource for InMemoryControls {
    type Control = TypeFilterControl;
    type Error = Infallible;

    fn select_type_controls(&self) -> Result<Vec<Self::Control>, Self::Error> {
        Ok(self.controls.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{default_type_controls, FilterControl, InMemoryControls, TypeFilterControl};
    use crate::model::album_type::AlbumType;

    #[test]
    fn default_controls_cover_every_type_checked() {
        let controls = default_type_controls();
        assert_eq!(controls.len(), AlbumType::ALL.len());
        assert!(controls.iter().all(|control| control.checked));
        assert_eq!(controls[0].name, "lp");
    }

    #[test]
    fn tuple_and_reference_controls_expose_state() {
        let tuple = ("demo", false);
        assert_eq!(tuple.name(), "demo");
        assert!(!tuple.is_checked());

        let owned = TypeFilterControl::checked("ep");
        let by_ref = &owned;
        assert_eq!(by_ref.name(), "ep");
        assert!(by_ref.is_checked());
    }

    #[test]
    fn set_checked_updates_matching_controls_only() {
        let mut controls = InMemoryControls::new(default_type_controls());
        assert_eq!(controls.set_checked("live", false), 1);
        assert_eq!(controls.set_checked("missing", false), 0);

        let unchecked = controls
            .controls()
            .iter()
            .filter(|control| !control.checked)
            .map(|control| control.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(unchecked, vec!["live"]);
    }

    #[test]
    fn controls_deserialize_from_host_json() {
        let json = r#"[{"name":"lp","checked":true},{"name":"live","checked":false}]"#;
        let controls: Vec<TypeFilterControl> = serde_json::from_str(json).unwrap();
        assert_eq!(
            controls,
            vec![
                TypeFilterControl::checked("lp"),
                TypeFilterControl::unchecked("live"),
            ]
        );
    }
}
