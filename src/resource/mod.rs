// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Startup resources the previewed content depends on.
//!
//! Attachment is fire-and-forget: it happens once at startup, is not
//! synchronized with evaluation, and nothing is consumed back from it. The
//! core never retries and never observes attachment failures.

use serde::Deserialize;

/// What a resource is, which decides how a host attaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Script,
    Stylesheet,
}

/// One resource to attach at startup. An explicit, typed descriptor; hosts
/// must not be handed arbitrary key/value bags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceDescriptor {
    pub url: String,
    pub kind: ResourceKind,
}

impl ResourceDescriptor {
    pub fn new(url: impl Into<String>, kind: ResourceKind) -> Self {
        Self { url: url.into(), kind }
    }
}

/// The attachment seam a host provides. Implementations are expected to be
/// best-effort; errors stay on their side of the boundary.
pub trait ResourceLoader {
    fn attach(&mut self, resources: &[ResourceDescriptor]);
}

/// The bundled loader: records what was requested so the shell can show it.
/// A terminal host has no page to attach scripts to; the record is the
/// attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentLog {
    attached: Vec<ResourceDescriptor>,
}

impl AttachmentLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attached(&self) -> &[ResourceDescriptor] {
        &self.attached
    }
}

impl ResourceLoader for AttachmentLog {
    fn attach(&mut self, resources: &[ResourceDescriptor]) {
        self.attached.extend_from_slice(resources);
    }
}

#[cfg(test)]
mod tests {
    use super::{AttachmentLog, ResourceDescriptor, ResourceKind, ResourceLoader};

    #[test]
    fn attachment_log_records_descriptors_in_order() {
        let mut log = AttachmentLog::new();
        log.attach(&[
            ResourceDescriptor::new("https://cdn.example.net/kit.esm.js", ResourceKind::Script),
            ResourceDescriptor::new("https://cdn.example.net/kit.css", ResourceKind::Stylesheet),
        ]);

        assert_eq!(log.attached().len(), 2);
        assert_eq!(log.attached()[0].kind, ResourceKind::Script);
        assert_eq!(log.attached()[1].url, "https://cdn.example.net/kit.css");
    }

    #[test]
    fn kind_deserializes_from_lowercase() {
        let descriptor: ResourceDescriptor =
            serde_json::from_str(r#"{"url": "https://x.invalid/a.css", "kind": "stylesheet"}"#)
                .expect("deserialize");
        assert_eq!(descriptor.kind, ResourceKind::Stylesheet);
    }
}
