/*!
 * Activation probing
 * Ask the wireless status tool whether an interface is associated with a network
 */

pub mod command;

use tracing::debug;

use crate::error::{Result, SchemeError};

pub use command::CommandStatusTool;

/// Raw result of one status tool invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusOutput {
    /// Combined stdout and stderr.
    pub output: Vec<u8>,
    /// `None` when the tool was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl StatusOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

/// Anything that can report the live status of a wireless interface.
pub trait StatusTool {
    fn run(&self, interface: &str) -> Result<StatusOutput>;
}

impl<T: StatusTool + ?Sized> StatusTool for &T {
    fn run(&self, interface: &str) -> Result<StatusOutput> {
        (**self).run(interface)
    }
}

impl<T: StatusTool + ?Sized> StatusTool for Box<T> {
    fn run(&self, interface: &str) -> Result<StatusOutput> {
        (**self).run(interface)
    }
}

pub struct ActivationProbe<T> {
    tool: T,
}

impl<T: StatusTool> ActivationProbe<T> {
    pub fn new(tool: T) -> Self {
        Self { tool }
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    /// True iff `target_ssid` appears anywhere in the tool's output for
    /// `interface`. An empty SSID is never active and skips the tool.
    pub fn is_associated(&self, interface: &str, target_ssid: &str) -> Result<bool> {
        if target_ssid.is_empty() {
            return Ok(false);
        }

        let status = self.tool.run(interface)?;
        let text = status.text();
        if !status.success() {
            return Err(SchemeError::Interface {
                interface: interface.to_string(),
                output: text,
            });
        }

        let associated = text.contains(target_ssid);
        debug!(interface, ssid = target_ssid, associated, "Probed interface");
        Ok(associated)
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeStatusTool;
    use super::*;

    const ASSOCIATED: &str = "wlan0     IEEE 802.11  ESSID:\"HomeNet\"\n          Mode:Managed  Frequency:2.437 GHz\n";
    const NOT_ASSOCIATED: &str = "wlan0     IEEE 802.11  ESSID:off/any\n          Access Point: Not-Associated\n";

    #[test]
    fn test_empty_ssid_skips_tool() {
        let probe = ActivationProbe::new(FakeStatusTool::ok(ASSOCIATED));
        assert!(!probe.is_associated("wlan0", "").unwrap());
        assert_eq!(probe.tool().calls.get(), 0);
    }

    #[test]
    fn test_ssid_in_output_is_associated() {
        let probe = ActivationProbe::new(FakeStatusTool::ok(ASSOCIATED));
        assert!(probe.is_associated("wlan0", "HomeNet").unwrap());
        assert_eq!(probe.tool().calls.get(), 1);
        assert_eq!(probe.tool().last_interface.borrow().as_deref(), Some("wlan0"));
    }

    #[test]
    fn test_ssid_missing_from_output() {
        let probe = ActivationProbe::new(FakeStatusTool::ok(NOT_ASSOCIATED));
        assert!(!probe.is_associated("wlan0", "HomeNet").unwrap());
    }

    #[test]
    fn test_substring_match_is_literal() {
        let probe = ActivationProbe::new(FakeStatusTool::ok("ESSID:HomeNet5G"));
        assert!(probe.is_associated("wlan0", "HomeNet").unwrap());
        assert!(!probe.is_associated("wlan0", "homenet").unwrap());
    }

    #[test]
    fn test_non_zero_exit_is_interface_error() {
        let probe = ActivationProbe::new(FakeStatusTool::failing("wlan9  No such device"));
        match probe.is_associated("wlan9", "HomeNet") {
            Err(SchemeError::Interface { interface, output }) => {
                assert_eq!(interface, "wlan9");
                assert_eq!(output, "wlan9  No such device");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_signal_termination_is_interface_error() {
        let probe = ActivationProbe::new(FakeStatusTool::with_exit(ASSOCIATED, None));
        assert!(matches!(
            probe.is_associated("wlan0", "HomeNet"),
            Err(SchemeError::Interface { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let output = StatusOutput {
            output: b"ESSID:\"Home\xffNet\" HomeNet".to_vec(),
            exit_code: Some(0),
        };
        assert!(output.text().contains("HomeNet"));
    }
}
