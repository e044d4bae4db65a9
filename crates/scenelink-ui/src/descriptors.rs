//! UI descriptor types
//!
//! Plain descriptions of what the addon contributes to the host UI.
//! The host maps these onto its own widget classes; the addon only
//! registers and unregisters them.

/// Where a panel is docked in the host UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSpace {
    /// Viewport sidebar
    Sidebar,
    /// Properties editor
    Properties,
    /// Developer-facing debug area
    Debug,
}

/// A UI panel contributed by the addon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelDescriptor {
    /// Unique panel id, e.g. `scenelink.rooms`
    pub id: String,
    /// Label shown in the host UI
    pub label: String,
    /// Dock location
    pub space: PanelSpace,
}

/// An operator (user-invokable action) contributed by the addon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorDescriptor {
    /// Unique operator id, e.g. `scenelink.connect`
    pub id: String,
    /// Label shown in menus and buttons
    pub label: String,
    /// One-line description for tooltips
    pub description: String,
}

/// Field type inside a property group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Bool,
    Int,
    Float,
    Text,
}

/// One field of a property group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyField {
    pub name: String,
    pub kind: PropertyKind,
}

impl PropertyField {
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// A group of properties attached to host data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyGroupDescriptor {
    /// Unique group id, e.g. `scenelink.room_settings`
    pub id: String,
    /// Fields in declaration order
    pub fields: Vec<PropertyField>,
}

/// A page in the host's addon-preferences UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencePageDescriptor {
    /// Unique page id
    pub id: String,
    /// Label shown in the preferences window
    pub label: String,
}
