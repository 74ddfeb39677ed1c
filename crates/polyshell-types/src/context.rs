//! Execution context for one dispatch invocation.
//!
//! The record captures where a request came from and what is known about
//! the machine that will run the generated script. Filling it in (URL
//! parsing, platform probing) happens outside this crate; here it is plain
//! data that serializes into debug dumps and substitutes into templates.

use serde::{Deserialize, Serialize};

/// Request and system information for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Origin of the request (scheme, host, port).
    pub req_orig: String,
    /// Request path.
    pub req_path: String,
    /// Request search string.
    pub req_srch: String,
    /// CPU architecture, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys_cpu_arch: Option<String>,
    /// CPU vendor identifier, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys_cpu_ven_id: Option<String>,
    /// Host name, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys_host: Option<String>,
    /// Desktop environment identifier, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys_os_de_id: Option<String>,
    /// Operating system identifier, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys_os_id: Option<String>,
    /// Operating system platform, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys_os_plat: Option<String>,
    /// Operating system version identifier, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys_os_ver_id: Option<String>,
    /// Operating system version codename, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys_os_ver_code: Option<String>,
    /// User name, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sys_user: Option<String>,
}

impl Context {
    /// Field names and values, in declaration order. Absent options read
    /// as the empty string.
    fn fields(&self) -> [(&'static str, &str); 12] {
        fn opt(o: &Option<String>) -> &str {
            o.as_deref().unwrap_or("")
        }
        [
            ("req_orig", self.req_orig.as_str()),
            ("req_path", self.req_path.as_str()),
            ("req_srch", self.req_srch.as_str()),
            ("sys_cpu_arch", opt(&self.sys_cpu_arch)),
            ("sys_cpu_ven_id", opt(&self.sys_cpu_ven_id)),
            ("sys_host", opt(&self.sys_host)),
            ("sys_os_de_id", opt(&self.sys_os_de_id)),
            ("sys_os_id", opt(&self.sys_os_id)),
            ("sys_os_plat", opt(&self.sys_os_plat)),
            ("sys_os_ver_id", opt(&self.sys_os_ver_id)),
            ("sys_os_ver_code", opt(&self.sys_os_ver_code)),
            ("sys_user", opt(&self.sys_user)),
        ]
    }
}

/// Replace `{FIELD_NAME}` placeholders in a line with context values.
///
/// Placeholders use the uppercased field name (`{SYS_HOST}`). Lines
/// without a `{` pass through untouched.
pub fn with_context(line: &str, context: &Context) -> String {
    if !line.contains('{') {
        return line.to_string();
    }
    let mut out = line.to_string();
    for (name, value) in context.fields() {
        out = out.replace(&format!("{{{}}}", name.to_uppercase()), value);
    }
    out
}
