//! Role-gated interactive tools. Slice navigation and playback are open to
//! every role and are not listed here.

use crate::model::ViewerRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tool {
    ZoomIn,
    ZoomOut,
    Reset,
    Brightness,
    Contrast,
    AnnotationToggle,
}

const PATIENT_TOOLS: &[Tool] = &[];

const CLINICIAN_TOOLS: &[Tool] = &[
    Tool::ZoomIn,
    Tool::ZoomOut,
    Tool::Reset,
    Tool::Brightness,
    Tool::Contrast,
    Tool::AnnotationToggle,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolCapabilitySet {
    tools: &'static [Tool],
}

impl Default for ToolCapabilitySet {
    /// The most restrictive set.
    fn default() -> Self {
        Self {
            tools: PATIENT_TOOLS,
        }
    }
}

impl ToolCapabilitySet {
    pub fn for_role(role: ViewerRole) -> Self {
        let tools = match role {
            ViewerRole::Patient => PATIENT_TOOLS,
            ViewerRole::Doctor | ViewerRole::Radiologist => CLINICIAN_TOOLS,
        };
        Self { tools }
    }

    pub fn allows(&self, tool: Tool) -> bool {
        self.tools.contains(&tool)
    }

    pub fn is_read_only(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patients_are_view_only() {
        let caps = ToolCapabilitySet::for_role(ViewerRole::Patient);
        assert!(caps.is_read_only());
        assert!(!caps.allows(Tool::ZoomIn));
        assert!(!caps.allows(Tool::Brightness));
        assert!(!caps.allows(Tool::AnnotationToggle));
    }

    #[test]
    fn clinicians_get_every_tool() {
        for role in [ViewerRole::Doctor, ViewerRole::Radiologist] {
            let caps = ToolCapabilitySet::for_role(role);
            for tool in [
                Tool::ZoomIn,
                Tool::ZoomOut,
                Tool::Reset,
                Tool::Brightness,
                Tool::Contrast,
            ] {
                assert!(caps.allows(tool), "{role} should have {tool:?}");
            }
        }
    }

    #[test]
    fn every_role_maps_to_a_set_and_unknown_roles_get_the_patient_set() {
        for role in ViewerRole::ALL {
            let caps = ToolCapabilitySet::for_role(role);
            assert_eq!(caps.is_read_only(), !role.is_clinician());
        }

        let unknown = ToolCapabilitySet::for_role(ViewerRole::from_role_str("janitor"));
        assert_eq!(unknown, ToolCapabilitySet::for_role(ViewerRole::Patient));
        assert_eq!(unknown, ToolCapabilitySet::default());
    }
}
