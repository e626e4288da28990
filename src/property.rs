//! Property descriptors and change notification towards a host application.
//!
//! Components do not know who owns them. An owner that wants to react to parameter changes
//! (to invalidate cached stiffness, refresh a panel, ...) installs a [`PropertyObserver`] on the
//! component's [`HostLink`], and the component reports every accepted or rejected mutation by
//! property name.
use log::trace;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PropertyEvent {
    /// The property was assigned a new value.
    Changed,
    /// A new value was rejected and the previous value was retained.
    Rejected,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PropertyChange<'a> {
    pub property: &'a str,
    pub event: PropertyEvent,
}

/// Callback installed by the owner of a component.
pub type PropertyObserver = Arc<dyn Fn(&PropertyChange) + Send + Sync>;

/// The connection between a component and its host.
///
/// A freshly created or copied component is detached; notifications on a detached link are
/// dropped.
#[derive(Default)]
pub struct HostLink {
    observer: Option<PropertyObserver>,
}

impl HostLink {
    pub fn new(observer: PropertyObserver) -> Self {
        Self {
            observer: Some(observer),
        }
    }

    pub fn set_observer(&mut self, observer: Option<PropertyObserver>) {
        self.observer = observer;
    }

    pub fn is_attached(&self) -> bool {
        self.observer.is_some()
    }

    pub fn notify(&self, property: &str, event: PropertyEvent) {
        trace!("Property '{}': {:?}", property, event);
        if let Some(observer) = &self.observer {
            observer(&PropertyChange { property, event });
        }
    }

    pub fn notify_changed(&self, property: &str) {
        self.notify(property, PropertyEvent::Changed)
    }

    pub fn notify_rejected(&self, property: &str) {
        self.notify(property, PropertyEvent::Rejected)
    }
}

impl fmt::Debug for HostLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostLink")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Static description of a property exposed to a host.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: &'static str,
    pub description: &'static str,
    /// Default value in its textual form.
    pub default_value: &'static str,
    /// Optional display format hint (numeric format, scale and slider range).
    pub format: Option<&'static str>,
}

impl PropertyInfo {
    pub const fn new(name: &'static str, description: &'static str, default_value: &'static str) -> Self {
        Self {
            name,
            description,
            default_value,
            format: None,
        }
    }

    pub const fn with_format(self, format: &'static str) -> Self {
        Self {
            format: Some(format),
            ..self
        }
    }
}

/// Looks up a property by name in a property list.
pub fn find_property<'a>(properties: &'a [PropertyInfo], name: &str) -> Option<&'a PropertyInfo> {
    properties.iter().find(|info| info.name == name)
}
