/*!
 * Platform-specific connection probes
 *
 * Each probe drives the OS network manager CLI:
 * - Linux: nmcli
 * - macOS: networksetup (airport for listing)
 * - Windows: netsh wlan with a generated WPA2-PSK profile
 *
 * A successful join is taken as proof of a correct credential. The
 * parsing helpers are kept free of cfg gates so they are testable on
 * any host.
 */

use std::process::Command;
use std::time::Duration;

use crate::probe::{ConnectionProbe, ProbeError};

/// Probe backed by this platform's network manager.
pub fn system_probe() -> Box<dyn ConnectionProbe> {
    #[cfg(target_os = "linux")]
    {
        Box::new(NmcliProbe::new())
    }
    #[cfg(target_os = "macos")]
    {
        Box::new(NetworksetupProbe::new())
    }
    #[cfg(target_os = "windows")]
    {
        Box::new(NetshProbe::new())
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        Box::new(UnsupportedProbe)
    }
}

/// Pick the first wifi device out of `nmcli -t -f DEVICE,TYPE device`.
#[allow(dead_code)] // unused on some targets
fn parse_wifi_device(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let (device, kind) = line.split_once(':')?;
        (kind == "wifi").then(|| device.to_string())
    })
}

/// SSIDs out of `nmcli -t -f SSID device wifi list`, deduplicated,
/// hidden networks dropped.
#[allow(dead_code)] // unused on some targets
fn parse_nmcli_ssids(output: &str) -> Vec<String> {
    let mut ssids: Vec<String> = Vec::new();
    for line in output.lines() {
        let ssid = line.trim();
        if !ssid.is_empty() && !ssids.iter().any(|s| s == ssid) {
            ssids.push(ssid.to_string());
        }
    }
    ssids
}

/// SSIDs out of `netsh wlan show networks`.
#[allow(dead_code)] // unused on some targets
fn parse_netsh_networks(output: &str) -> Vec<String> {
    let mut ssids = Vec::new();
    for line in output.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("SSID ") {
            if let Some((_, name)) = rest.split_once(':') {
                let name = name.trim();
                if !name.is_empty() {
                    ssids.push(name.to_string());
                }
            }
        }
    }
    ssids
}

#[allow(dead_code)] // unused on some targets
fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// WPA2-PSK profile document for `netsh wlan add profile`.
#[allow(dead_code)] // unused on some targets
fn wlan_profile_xml(ssid: &str, password: &str) -> String {
    let ssid = xml_escape(ssid);
    let password = xml_escape(password);
    format!(
        "<?xml version=\"1.0\"?>\
         <WLANProfile xmlns=\"http://www.microsoft.com/networking/WLAN/profile/v1\">\
         <name>{ssid}</name>\
         <SSIDConfig><SSID><name>{ssid}</name></SSID></SSIDConfig>\
         <connectionType>ESS</connectionType>\
         <connectionMode>auto</connectionMode>\
         <MSM><security>\
         <authEncryption>\
         <authentication>WPA2PSK</authentication>\
         <encryption>AES</encryption>\
         <useOneX>false</useOneX>\
         </authEncryption>\
         <sharedKey>\
         <keyType>passPhrase</keyType>\
         <protected>false</protected>\
         <keyMaterial>{password}</keyMaterial>\
         </sharedKey>\
         </security></MSM>\
         </WLANProfile>"
    )
}

/// nmcli-backed probe for Linux.
#[cfg(target_os = "linux")]
pub struct NmcliProbe {
    device: Option<String>,
}

#[cfg(target_os = "linux")]
impl NmcliProbe {
    pub fn new() -> Self {
        Self { device: None }
    }
}

#[cfg(target_os = "linux")]
impl Default for NmcliProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "linux")]
impl ConnectionProbe for NmcliProbe {
    fn initialize(&mut self) -> Result<(), ProbeError> {
        let output = Command::new("nmcli")
            .args(["-t", "-f", "DEVICE,TYPE", "device"])
            .output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        match parse_wifi_device(&stdout) {
            Some(device) => {
                self.device = Some(device);
                Ok(())
            }
            None => Err(ProbeError::InterfaceUnavailable(
                "nmcli reported no wifi device".to_string(),
            )),
        }
    }

    fn try_connect(
        &mut self,
        target: &str,
        credential: &str,
        timeout: Duration,
    ) -> Result<bool, ProbeError> {
        // Drop any stale profile for this SSID so the attempt uses the
        // candidate credential, not a remembered one.
        let _ = Command::new("nmcli")
            .args(["connection", "delete", "id", target])
            .output();

        let wait = timeout.as_secs().max(1).to_string();
        let mut cmd = Command::new("nmcli");
        cmd.args(["-w", &wait, "device", "wifi", "connect", target])
            .args(["password", credential]);
        if let Some(device) = &self.device {
            cmd.args(["ifname", device]);
        }

        let output = cmd.output()?;
        Ok(output.status.success())
    }

    fn disconnect(&mut self) -> Result<(), ProbeError> {
        if let Some(device) = &self.device {
            Command::new("nmcli")
                .args(["device", "disconnect", device])
                .output()?;
        }
        Ok(())
    }

    fn list_networks(&mut self) -> Result<Vec<String>, ProbeError> {
        let output = Command::new("nmcli")
            .args(["-t", "-f", "SSID", "device", "wifi", "list"])
            .output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_nmcli_ssids(&stdout))
    }
}

/// networksetup-backed probe for macOS.
#[cfg(target_os = "macos")]
pub struct NetworksetupProbe {
    interface: String,
}

#[cfg(target_os = "macos")]
impl NetworksetupProbe {
    pub fn new() -> Self {
        // WiFi is en0 on nearly every Mac.
        Self {
            interface: "en0".to_string(),
        }
    }
}

#[cfg(target_os = "macos")]
impl Default for NetworksetupProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "macos")]
impl ConnectionProbe for NetworksetupProbe {
    fn initialize(&mut self) -> Result<(), ProbeError> {
        let output = Command::new("networksetup")
            .args(["-listallhardwareports"])
            .output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.contains("Wi-Fi") {
            Ok(())
        } else {
            Err(ProbeError::InterfaceUnavailable(
                "no Wi-Fi hardware port found".to_string(),
            ))
        }
    }

    fn try_connect(
        &mut self,
        target: &str,
        credential: &str,
        _timeout: Duration,
    ) -> Result<bool, ProbeError> {
        let output = Command::new("networksetup")
            .args(["-setairportnetwork", &self.interface, target, credential])
            .output()?;
        // networksetup exits 0 either way; a failed join prints an
        // error line to stdout, a successful one prints nothing.
        Ok(output.status.success() && output.stdout.is_empty())
    }

    fn disconnect(&mut self) -> Result<(), ProbeError> {
        Command::new("networksetup")
            .args(["-setairportpower", &self.interface, "off"])
            .output()?;
        Command::new("networksetup")
            .args(["-setairportpower", &self.interface, "on"])
            .output()?;
        Ok(())
    }

    fn list_networks(&mut self) -> Result<Vec<String>, ProbeError> {
        let output = Command::new(
            "/System/Library/PrivateFrameworks/Apple80211.framework/Versions/Current/Resources/airport",
        )
        .arg("-s")
        .output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let ssids = stdout
            .lines()
            .skip(1)
            .filter_map(|line| line.split_whitespace().next())
            .map(|s| s.to_string())
            .collect();
        Ok(ssids)
    }
}

/// netsh-backed probe for Windows. Writes a temporary WPA2-PSK
/// profile per attempt, the same dance the native WLAN API requires.
#[cfg(target_os = "windows")]
pub struct NetshProbe {
    profile_path: std::path::PathBuf,
}

#[cfg(target_os = "windows")]
impl NetshProbe {
    pub fn new() -> Self {
        Self {
            profile_path: std::env::temp_dir().join("wifi-brute-profile.xml"),
        }
    }
}

#[cfg(target_os = "windows")]
impl Default for NetshProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "windows")]
impl ConnectionProbe for NetshProbe {
    fn initialize(&mut self) -> Result<(), ProbeError> {
        let output = Command::new("netsh")
            .args(["wlan", "show", "interfaces"])
            .output()?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ProbeError::InterfaceUnavailable(
                "netsh reported no wireless interface".to_string(),
            ))
        }
    }

    fn try_connect(
        &mut self,
        target: &str,
        credential: &str,
        timeout: Duration,
    ) -> Result<bool, ProbeError> {
        std::fs::write(&self.profile_path, wlan_profile_xml(target, credential))?;

        let _ = Command::new("netsh")
            .args(["wlan", "delete", "profile", &format!("name={}", target)])
            .output();
        let add = Command::new("netsh")
            .args(["wlan", "add", "profile"])
            .arg(format!("filename={}", self.profile_path.display()))
            .output()?;
        if !add.status.success() {
            return Err(ProbeError::Malformed(
                String::from_utf8_lossy(&add.stderr).trim().to_string(),
            ));
        }

        let connect = Command::new("netsh")
            .args(["wlan", "connect", &format!("name={}", target)])
            .output()?;
        if !connect.status.success() {
            return Ok(false);
        }

        // The connect command returns before association finishes.
        std::thread::sleep(timeout);

        let status = Command::new("netsh")
            .args(["wlan", "show", "interfaces"])
            .output()?;
        let stdout = String::from_utf8_lossy(&status.stdout);
        let connected = stdout.lines().any(|line| {
            let line = line.trim();
            line.starts_with("State") && line.ends_with("connected")
        });
        Ok(connected)
    }

    fn disconnect(&mut self) -> Result<(), ProbeError> {
        Command::new("netsh").args(["wlan", "disconnect"]).output()?;
        Ok(())
    }

    fn list_networks(&mut self) -> Result<Vec<String>, ProbeError> {
        let output = Command::new("netsh")
            .args(["wlan", "show", "networks"])
            .output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_netsh_networks(&stdout))
    }
}

/// Fallback for platforms without a supported network manager.
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub struct UnsupportedProbe;

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
impl ConnectionProbe for UnsupportedProbe {
    fn initialize(&mut self) -> Result<(), ProbeError> {
        Err(ProbeError::InterfaceUnavailable(
            "platform not supported".to_string(),
        ))
    }

    fn try_connect(
        &mut self,
        _target: &str,
        _credential: &str,
        _timeout: Duration,
    ) -> Result<bool, ProbeError> {
        Err(ProbeError::InterfaceUnavailable(
            "platform not supported".to_string(),
        ))
    }

    fn disconnect(&mut self) -> Result<(), ProbeError> {
        Ok(())
    }

    fn list_networks(&mut self) -> Result<Vec<String>, ProbeError> {
        Err(ProbeError::InterfaceUnavailable(
            "platform not supported".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wifi_device_picks_first_wifi() {
        let output = "lo:loopback\neth0:ethernet\nwlan0:wifi\nwlan1:wifi\n";
        assert_eq!(parse_wifi_device(output), Some("wlan0".to_string()));
    }

    #[test]
    fn test_parse_wifi_device_none_without_wifi() {
        assert_eq!(parse_wifi_device("eth0:ethernet\n"), None);
    }

    #[test]
    fn test_parse_nmcli_ssids_dedups_and_skips_hidden() {
        let output = "HomeNet\n\nHomeNet\nCafe Guest\n";
        assert_eq!(
            parse_nmcli_ssids(output),
            vec!["HomeNet".to_string(), "Cafe Guest".to_string()]
        );
    }

    #[test]
    fn test_parse_netsh_networks() {
        let output = "\
Interface name : Wi-Fi
There are 2 networks currently visible.

SSID 1 : HomeNet
    Network type            : Infrastructure

SSID 2 : Cafe Guest
    Network type            : Infrastructure
";
        assert_eq!(
            parse_netsh_networks(output),
            vec!["HomeNet".to_string(), "Cafe Guest".to_string()]
        );
    }

    #[test]
    fn test_profile_xml_escapes_credentials() {
        let xml = wlan_profile_xml("Net<&>", "pass\"word'");
        assert!(xml.contains("<name>Net&lt;&amp;&gt;</name>"));
        assert!(xml.contains("<keyMaterial>pass&quot;word&apos;</keyMaterial>"));
        assert!(xml.contains("WPA2PSK"));
    }
}
