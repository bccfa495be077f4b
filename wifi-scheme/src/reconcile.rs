/*!
 * Scheme state reconciliation
 * Validates an update, probes the interface and commits the merged record
 */

use tracing::{info, warn};

use crate::error::{Result, SchemeError};
use crate::probe::{ActivationProbe, StatusTool};
use crate::properties::{PropertyRecord, PropertyStore, INTERFACE_CURRENT, SCHEME_CURRENT};

/// A requested change of interface and/or scheme.
///
/// Interface and scheme travel together: both or neither. Neither means
/// "re-probe what is already stored".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRequest {
    pub interface_current: Option<String>,
    pub scheme_current: Option<String>,
    pub target_ssid: Option<String>,
}

impl UpdateRequest {
    pub fn select(interface: impl Into<String>, scheme: impl Into<String>, target_ssid: impl Into<String>) -> Self {
        Self {
            interface_current: Some(interface.into()),
            scheme_current: Some(scheme.into()),
            target_ssid: Some(target_ssid.into()),
        }
    }

    pub fn refresh(target_ssid: impl Into<String>) -> Self {
        Self {
            target_ssid: Some(target_ssid.into()),
            ..Self::default()
        }
    }

    /// Empty strings count as not given.
    fn interface(&self) -> Option<&str> {
        self.interface_current.as_deref().filter(|s| !s.is_empty())
    }

    fn scheme(&self) -> Option<&str> {
        self.scheme_current.as_deref().filter(|s| !s.is_empty())
    }

    fn is_partial(&self) -> bool {
        self.interface().is_some() != self.scheme().is_some()
    }
}

/// How a request naming only one of interface/scheme is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PartialUpdatePolicy {
    /// Return the stored record untouched.
    #[default]
    Ignore,
    /// Fail with [`SchemeError::InvalidRequest`].
    Reject,
}

pub struct StateReconciler<T> {
    store: PropertyStore,
    probe: ActivationProbe<T>,
    partial_policy: PartialUpdatePolicy,
}

impl<T: StatusTool> StateReconciler<T> {
    pub fn new(store: PropertyStore, probe: ActivationProbe<T>) -> Self {
        Self {
            store,
            probe,
            partial_policy: PartialUpdatePolicy::default(),
        }
    }

    pub fn with_partial_policy(mut self, policy: PartialUpdatePolicy) -> Self {
        self.partial_policy = policy;
        self
    }

    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    pub fn probe(&self) -> &ActivationProbe<T> {
        &self.probe
    }

    /// Apply `request` and return the record as committed.
    ///
    /// A probe failure aborts before anything is written.
    pub fn update(&self, request: &UpdateRequest) -> Result<PropertyRecord> {
        let mut record = self.store.load()?;

        if request.is_partial() {
            return match self.partial_policy {
                PartialUpdatePolicy::Ignore => {
                    warn!(?request, "Ignoring update that names only one of interface/scheme");
                    Ok(record)
                }
                PartialUpdatePolicy::Reject => Err(SchemeError::InvalidRequest(
                    "interface and scheme must be given together".to_string(),
                )),
            };
        }

        if let (Some(interface), Some(scheme)) = (request.interface(), request.scheme()) {
            record.set(INTERFACE_CURRENT, interface);
            record.set(SCHEME_CURRENT, scheme);
        }

        let target_ssid = request.target_ssid.as_deref().unwrap_or("");
        let interface = request.interface().or_else(|| record.interface_current());

        let active = match interface {
            Some(interface) if !interface.is_empty() => self.probe.is_associated(interface, target_ssid)?,
            _ => {
                if !target_ssid.is_empty() {
                    warn!(ssid = target_ssid, "No interface selected, scheme marked inactive");
                }
                false
            }
        };
        record.set_scheme_active(active);

        self.store.save(&record)?;
        info!(
            interface = record.interface_current().unwrap_or(""),
            scheme = record.scheme_current().unwrap_or(""),
            active,
            "Committed scheme state"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::fake::FakeStatusTool;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    const STORED: &str = "interface_current=wlan0\nscheme_active=False\nscheme_current=home\n";

    fn reconciler(tool: FakeStatusTool, contents: &str) -> (TempDir, StateReconciler<FakeStatusTool>) {
        let dir = tempdir().unwrap();
        let store = PropertyStore::open(dir.path().join("runningconfig")).unwrap();
        fs::write(store.path(), contents).unwrap();
        (dir, StateReconciler::new(store, ActivationProbe::new(tool)))
    }

    fn on_disk(reconciler: &StateReconciler<FakeStatusTool>) -> String {
        fs::read_to_string(reconciler.store().path()).unwrap()
    }

    #[test]
    fn test_interface_only_is_noop() {
        let (_dir, reconciler) = reconciler(FakeStatusTool::ok("ESSID:\"Office\""), STORED);
        let request = UpdateRequest {
            interface_current: Some("wlan1".to_string()),
            target_ssid: Some("Office".to_string()),
            ..UpdateRequest::default()
        };

        let record = reconciler.update(&request).unwrap();
        assert_eq!(record.interface_current(), Some("wlan0"));
        assert_eq!(on_disk(&reconciler), STORED);
        assert_eq!(reconciler.probe().tool().calls.get(), 0);
    }

    #[test]
    fn test_scheme_only_is_noop() {
        let (_dir, reconciler) = reconciler(FakeStatusTool::ok(""), STORED);
        let request = UpdateRequest {
            scheme_current: Some("office".to_string()),
            ..UpdateRequest::default()
        };

        reconciler.update(&request).unwrap();
        assert_eq!(on_disk(&reconciler), STORED);
    }

    #[test]
    fn test_empty_interface_counts_as_absent() {
        let (_dir, reconciler) = reconciler(FakeStatusTool::ok(""), STORED);
        let request = UpdateRequest::select("", "office", "Office");

        reconciler.update(&request).unwrap();
        assert_eq!(on_disk(&reconciler), STORED);
    }

    #[test]
    fn test_partial_update_rejected_when_strict() {
        let (_dir, reconciler) = reconciler(FakeStatusTool::ok(""), STORED);
        let reconciler = reconciler.with_partial_policy(PartialUpdatePolicy::Reject);
        let request = UpdateRequest {
            interface_current: Some("wlan1".to_string()),
            ..UpdateRequest::default()
        };

        assert!(matches!(reconciler.update(&request), Err(SchemeError::InvalidRequest(_))));
        assert_eq!(on_disk(&reconciler), STORED);
    }

    #[test]
    fn test_empty_ssid_marks_inactive_without_probe() {
        let (_dir, reconciler) = reconciler(FakeStatusTool::ok("ESSID:\"Office\""), STORED);
        let record = reconciler.update(&UpdateRequest::select("wlan1", "office", "")).unwrap();

        assert_eq!(record.interface_current(), Some("wlan1"));
        assert_eq!(record.scheme_current(), Some("office"));
        assert_eq!(record.scheme_active(), Some(false));
        assert_eq!(reconciler.probe().tool().calls.get(), 0);
        assert_eq!(on_disk(&reconciler), "interface_current=wlan1\nscheme_active=False\nscheme_current=office\n");
    }

    #[test]
    fn test_ssid_in_probe_output_marks_active() {
        let (_dir, reconciler) = reconciler(FakeStatusTool::ok("wlan1  ESSID:\"Office\""), STORED);
        let record = reconciler.update(&UpdateRequest::select("wlan1", "office", "Office")).unwrap();

        assert_eq!(record.scheme_active(), Some(true));
        assert_eq!(reconciler.probe().tool().last_interface.borrow().as_deref(), Some("wlan1"));
        assert_eq!(reconciler.store().load().unwrap(), record);
    }

    #[test]
    fn test_ssid_absent_from_probe_output_marks_inactive() {
        let (_dir, reconciler) = reconciler(FakeStatusTool::ok("Access Point: Not-Associated"), STORED);
        let record = reconciler.update(&UpdateRequest::select("wlan1", "office", "Office")).unwrap();
        assert_eq!(record.scheme_active(), Some(false));
    }

    #[test]
    fn test_refresh_probes_stored_interface() {
        let contents = "interface_current=wlan0\nscheme_active=False\nscheme_current=home\n";
        let (_dir, reconciler) = reconciler(FakeStatusTool::ok("ESSID:\"HomeNet\""), contents);
        let record = reconciler.update(&UpdateRequest::refresh("HomeNet")).unwrap();

        assert_eq!(record.scheme_active(), Some(true));
        assert_eq!(record.scheme_current(), Some("home"));
        assert_eq!(reconciler.probe().tool().last_interface.borrow().as_deref(), Some("wlan0"));
    }

    #[test]
    fn test_refresh_without_stored_interface_is_inactive() {
        let (_dir, reconciler) = reconciler(FakeStatusTool::ok("ESSID:\"HomeNet\""), "");
        let record = reconciler.update(&UpdateRequest::refresh("HomeNet")).unwrap();

        assert_eq!(record.scheme_active(), Some(false));
        assert_eq!(reconciler.probe().tool().calls.get(), 0);
        assert_eq!(on_disk(&reconciler), "scheme_active=False\n");
    }

    #[test]
    fn test_probe_failure_leaves_store_untouched() {
        let (_dir, reconciler) = reconciler(FakeStatusTool::failing("wlan9  No such device"), STORED);
        let result = reconciler.update(&UpdateRequest::select("wlan9", "office", "Office"));

        assert!(matches!(result, Err(SchemeError::Interface { .. })));
        assert_eq!(on_disk(&reconciler), STORED);
    }

    #[test]
    fn test_update_keeps_unrelated_keys() {
        let contents = "extra=kept\ninterface_current=wlan0\nscheme_current=home\n";
        let (_dir, reconciler) = reconciler(FakeStatusTool::ok(""), contents);
        let record = reconciler.update(&UpdateRequest::select("wlan1", "office", "")).unwrap();

        assert_eq!(record.get("extra"), Some("kept"));
        assert!(on_disk(&reconciler).starts_with("extra=kept\n"));
    }
}
