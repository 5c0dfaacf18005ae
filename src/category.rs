use crate::paths::PathEntry;

/// One functional category: a label, a display title, and the keywords that
/// claim a path for it.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub title: String,
    /// Lowercase substrings matched against the lowercased path.
    pub keywords: Vec<String>,
}

impl Category {
    pub fn new(name: &str, title: &str, keywords: &[&str]) -> Category {
        Category {
            name: name.to_string(),
            title: title.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

/// Priority-ordered keyword classifier for derived paths.
///
/// This is a best-effort heuristic for output organization, not a semantic
/// classification; a path matching keywords from two categories goes to
/// whichever appears earlier in the list, and known misfiles are accepted.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    /// Checked in order; the first keyword match wins.
    pub categories: Vec<Category>,
    /// Well-known top-level leaf paths pinned to the `core` category,
    /// matched against the path with its module qualifier stripped.
    pub core_paths: Vec<String>,
    /// Constant anchor prefix removed before keyword matching. Without this,
    /// an anchor like `native/` would satisfy substring keywords on every
    /// path (`"nat"` occurs inside `"native"`) and the fallback bucket would
    /// be unreachable.
    pub strip_prefix: Option<String>,
    /// Bucket absorbing paths no category claims.
    pub fallback: String,
}

impl CategoryTable {
    /// Assigns a path to its category label.
    pub fn assign(&self, path: &str) -> &str {
        let local = path.split_once(':').map(|(_, rest)| rest).unwrap_or(path);
        if self
            .core_paths
            .iter()
            .any(|core| core.eq_ignore_ascii_case(local))
        {
            return "core";
        }
        let subject = match &self.strip_prefix {
            Some(prefix) => local.strip_prefix(prefix.as_str()).unwrap_or(path),
            None => path,
        };
        let lower = subject.to_lowercase();
        for category in &self.categories {
            if category.keywords.iter().any(|k| lower.contains(k.as_str())) {
                return &category.name;
            }
        }
        &self.fallback
    }

    /// Display title for a category label, falling back to the label itself.
    pub fn title_of<'a>(&'a self, name: &'a str) -> &'a str {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.title.as_str())
            .unwrap_or(name)
    }

    fn bucket_order(&self) -> Vec<&str> {
        let mut order: Vec<&str> = self.categories.iter().map(|c| c.name.as_str()).collect();
        if !order.iter().any(|n| *n == self.fallback) {
            order.push(&self.fallback);
        }
        order
    }

    /// Category table of the native configuration model family.
    pub fn native_config() -> CategoryTable {
        CategoryTable {
            categories: vec![
                Category::new("core", "Core System Settings", &[]),
                Category::new(
                    "interfaces",
                    "Interfaces",
                    &[
                        "interface",
                        "gigabitethernet",
                        "tengigabitethernet",
                        "fastethernet",
                        "ethernet",
                        "loopback",
                        "tunnel",
                        "vlan",
                        "port-channel",
                        "serial",
                        "dialer",
                        "bdi",
                        "virtual-template",
                        "management-interface",
                    ],
                ),
                Category::new(
                    "crypto",
                    "Cryptography & PKI",
                    &[
                        "crypto",
                        "ikev2",
                        "ipsec",
                        "isakmp",
                        "pki",
                        "key",
                        "certificate",
                        "keyring",
                        "trustpoint",
                        "macsec",
                        "mka",
                    ],
                ),
                Category::new(
                    "platform",
                    "Platform & Hardware",
                    &[
                        "hw-module",
                        "stack",
                        "switch",
                        "breakout",
                        "module",
                        "card",
                        "platform",
                        "controller",
                        "redundancy",
                        "upgrade",
                        "software",
                        "boot",
                        "config-register",
                        "subslot",
                        "transceiver",
                    ],
                ),
                Category::new(
                    "monitor",
                    "Monitoring & Analytics",
                    &[
                        "monitor", "span", "rspan", "erspan", "flow", "sampler", "rmon",
                        "netflow", "session",
                    ],
                ),
                Category::new(
                    "routing",
                    "Routing Protocols",
                    &[
                        "router",
                        "bgp",
                        "ospf",
                        "eigrp",
                        "rip",
                        "isis",
                        "route-map",
                        "prefix-list",
                        "track",
                        "bfd",
                        "route",
                    ],
                ),
                Category::new(
                    "switching",
                    "Switching & VLANs",
                    &[
                        "vlan",
                        "spanning-tree",
                        "switchport",
                        "channel-group",
                        "mac-address-table",
                        "errdisable",
                        "vtp",
                        "lacp",
                        "xconnect",
                        "pseudowire",
                        "l2tp",
                        "mac",
                    ],
                ),
                Category::new(
                    "security",
                    "Security & AAA",
                    &[
                        "access-list",
                        "aaa",
                        "zone",
                        "class-map",
                        "policy-map",
                        "acl",
                        "enable",
                        "username",
                        "password",
                        "login",
                        "privilege",
                        "dot1x",
                        "radius",
                        "tacacs",
                        "identity",
                        "object-group",
                    ],
                ),
                Category::new(
                    "services",
                    "Network Services",
                    &[
                        "dhcp",
                        "nat",
                        "ntp",
                        "snmp",
                        "logging",
                        "cdp",
                        "lldp",
                        "dns",
                        "domain",
                        "archive",
                        "tftp-server",
                        "radius-server",
                        "ldap",
                        "http",
                        "telnet",
                        "ssh",
                        "service",
                    ],
                ),
                Category::new(
                    "qos",
                    "QoS & Policy",
                    &["qos", "service-policy", "class", "policy", "parameter-map", "sdm"],
                ),
                Category::new(
                    "mpls",
                    "MPLS & TE",
                    &["mpls", "ldp", "traffic-eng", "segment-routing"],
                ),
                Category::new("vpn", "VPN & Tunnels", &["tunnel", "gre", "dmvpn"]),
                Category::new("wireless", "Wireless", &["wireless", "wlan", "dot11"]),
                Category::new("call-home", "Call Home & Licensing", &["call-home"]),
                Category::new(
                    "voice",
                    "Voice & Telephony",
                    &["voice", "dial-peer", "voice-class", "sip"],
                ),
                Category::new(
                    "system",
                    "System & Management",
                    &[
                        "hostname",
                        "banner",
                        "clock",
                        "version",
                        "memory",
                        "scheduler",
                        "process",
                        "license",
                        "line",
                        "parser",
                        "location",
                        "system",
                        "vrf",
                        "subscriber",
                        "control-plane",
                        "exception",
                        "transport",
                        "protocol",
                        "default",
                        "profile",
                        "alias",
                        "group",
                    ],
                ),
            ],
            core_paths: vec![
                "native/version".to_string(),
                "native/hostname".to_string(),
                "native/config-register".to_string(),
                "native/boot-start-marker".to_string(),
                "native/boot-end-marker".to_string(),
            ],
            strip_prefix: Some("native/".to_string()),
            fallback: "system".to_string(),
        }
    }

    /// Category table of the operational (read-only state) model family.
    /// Operational module names carry the signal, so keywords target them.
    pub fn operational() -> CategoryTable {
        CategoryTable {
            categories: vec![
                Category::new(
                    "interfaces",
                    "Interfaces & Ports",
                    &["interface", "ethernet", "port", "poe"],
                ),
                Category::new(
                    "routing",
                    "Routing & Forwarding",
                    &[
                        "bgp", "ospf", "eigrp", "rip", "isis", "routing", "route", "rib",
                        "fib", "pim", "multicast", "igmp",
                    ],
                ),
                Category::new(
                    "platform",
                    "Platform & Environment",
                    &[
                        "platform",
                        "environment",
                        "power",
                        "fan",
                        "temperature",
                        "sensor",
                        "transceiver",
                        "stackwise",
                        "inventory",
                    ],
                ),
                Category::new(
                    "security",
                    "Security & Crypto",
                    &[
                        "aaa", "acl", "security", "crypto", "ipsec", "ikev2", "pki",
                        "trustsec", "macsec", "zone",
                    ],
                ),
                Category::new(
                    "mpls",
                    "MPLS & Segment Routing",
                    &["mpls", "ldp", "rsvp", "segment-routing"],
                ),
                Category::new(
                    "services",
                    "Services & Telemetry",
                    &["dhcp", "nat", "ntp", "flow", "telemetry", "utd"],
                ),
            ],
            core_paths: Vec::new(),
            strip_prefix: None,
            fallback: "system".to_string(),
        }
    }
}

/// Distributes entries into ordered category buckets. Every entry lands in
/// exactly one bucket; empty buckets are dropped.
pub fn bucketize(table: &CategoryTable, entries: Vec<PathEntry>) -> Vec<(String, Vec<PathEntry>)> {
    let mut buckets: Vec<(String, Vec<PathEntry>)> = table
        .bucket_order()
        .into_iter()
        .map(|name| (name.to_string(), Vec::new()))
        .collect();

    for entry in entries {
        let category = table.assign(&entry.path).to_string();
        match buckets.iter_mut().find(|(name, _)| *name == category) {
            Some((_, bucket)) => bucket.push(entry),
            None => buckets.push((category, vec![entry])),
        }
    }

    buckets.retain(|(_, bucket)| !bucket.is_empty());
    buckets
}
