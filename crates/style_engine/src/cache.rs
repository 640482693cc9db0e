use css::property_manager::PropertyManager;

/// Memoized styles for one target. A computed entry is valid while the
/// owning document's cache epoch is unchanged; an inline entry while the
/// `style` attribute text is unchanged.
#[derive(Debug, Default)]
pub(crate) struct CacheRecord {
    computed: Option<(PropertyManager, u64)>,
    inline: Option<(PropertyManager, String)>,
}

impl CacheRecord {
    pub(crate) fn valid_computed(&self, epoch: u64) -> Option<&PropertyManager> {
        self.computed
            .as_ref()
            .filter(|(_, cached_epoch)| *cached_epoch == epoch)
            .map(|(manager, _)| manager)
    }

    pub(crate) fn valid_inline(&self, css_text: &str) -> Option<&PropertyManager> {
        self.inline
            .as_ref()
            .filter(|(_, cached_text)| cached_text == css_text)
            .map(|(manager, _)| manager)
    }

    pub(crate) fn store_computed(&mut self, manager: PropertyManager, epoch: u64) {
        self.computed = Some((manager, epoch));
    }

    pub(crate) fn store_inline(&mut self, manager: PropertyManager, css_text: String) {
        self.inline = Some((manager, css_text));
    }
}
