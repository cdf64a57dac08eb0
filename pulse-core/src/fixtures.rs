//! Static data shown by the dashboard: fleet, endpoint types, anomalies,
//! fallback telemetry and the canned remediation report.

use std::collections::BTreeMap;

use crate::format::Status;
use crate::model::{
    CpuLoad, DiskInfo, FunctionalMetrics, MemoryStats, NetworkInterface, ProcessInfo,
    ProcessStats, SystemMetrics, TelemetrySnapshot, TrafficStats,
};
use crate::series::MetricSample;

#[derive(Clone, Debug, PartialEq)]
pub struct ServerSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub location: &'static str,
    pub status: Status,
    pub cpu_usage: f64,
    pub memory_usage: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointType {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnomalyKind {
    BadRequest,
    GoodRequest,
    Unauthorized,
    Timeout,
    Other,
}

impl AnomalyKind {
    pub fn label(&self) -> &'static str {
        match self {
            AnomalyKind::BadRequest => "Bad Request",
            AnomalyKind::GoodRequest => "Good Request",
            AnomalyKind::Unauthorized => "Unauthorized",
            AnomalyKind::Timeout => "Timeout",
            AnomalyKind::Other => "Other",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnomalyRecord {
    pub id: u32,
    pub kind: AnomalyKind,
    pub description: &'static str,
    pub timestamp: &'static str,
    pub severity: Severity,
}

pub static SERVERS: [ServerSummary; 6] = [
    ServerSummary {
        id: "server-001",
        name: "Web Server 01",
        location: "US East - Virginia",
        status: Status::Online,
        cpu_usage: 45.0,
        memory_usage: 67.0,
    },
    ServerSummary {
        id: "server-002",
        name: "Database Server",
        location: "US West - California",
        status: Status::Online,
        cpu_usage: 78.0,
        memory_usage: 52.0,
    },
    ServerSummary {
        id: "server-003",
        name: "API Gateway",
        location: "EU West - Ireland",
        status: Status::Warning,
        cpu_usage: 89.0,
        memory_usage: 91.0,
    },
    ServerSummary {
        id: "server-004",
        name: "Load Balancer",
        location: "Asia Pacific - Tokyo",
        status: Status::Online,
        cpu_usage: 23.0,
        memory_usage: 34.0,
    },
    ServerSummary {
        id: "server-005",
        name: "Backup Server",
        location: "US Central - Texas",
        status: Status::Offline,
        cpu_usage: 0.0,
        memory_usage: 0.0,
    },
    ServerSummary {
        id: "server-006",
        name: "CDN Edge Server",
        location: "EU Central - Frankfurt",
        status: Status::Online,
        cpu_usage: 56.0,
        memory_usage: 43.0,
    },
];

pub static ENDPOINT_TYPES: [EndpointType; 4] = [
    EndpointType { id: "google", label: "google.com" },
    EndpointType { id: "snapchat", label: "snapchat.com" },
    EndpointType { id: "camera", label: "Camera" },
    EndpointType { id: "iot", label: "IoT Devices" },
];

/// Placeholder servers listed under every endpoint type: `(id, name)`.
pub const ENDPOINT_SERVERS: [(&str, &str); 3] = [
    ("server-1", "Server 1"),
    ("server-2", "Server 2"),
    ("server-3", "Server 3"),
];

pub fn server(id: &str) -> Option<&'static ServerSummary> {
    SERVERS.iter().find(|s| s.id == id)
}

macro_rules! anomaly {
    ($id:expr, $kind:ident, $desc:expr, $ts:expr, $sev:ident) => {
        AnomalyRecord {
            id: $id,
            kind: AnomalyKind::$kind,
            description: $desc,
            timestamp: $ts,
            severity: Severity::$sev,
        }
    };
}

pub static ANOMALIES: [AnomalyRecord; 25] = [
    anomaly!(1, BadRequest, "Multiple 400 errors from IP 192.168.1.10", "2024-06-10 12:15:23", High),
    anomaly!(2, GoodRequest, "Normal traffic pattern detected", "2024-06-10 12:14:10", Low),
    anomaly!(3, Other, "Unusual spike in POST requests", "2024-06-10 12:13:05", Medium),
    anomaly!(4, BadRequest, "Frequent 404 errors from IP 10.0.0.5", "2024-06-10 12:12:01", Medium),
    anomaly!(5, Other, "Sudden drop in GET requests", "2024-06-10 12:11:00", Low),
    anomaly!(6, Unauthorized, "Multiple failed login attempts detected", "2024-06-10 12:10:02", High),
    anomaly!(7, BadRequest, "Malformed request headers received", "2024-06-10 12:09:20", Medium),
    anomaly!(8, Other, "Unexpected increase in DELETE requests", "2024-06-10 12:08:45", Low),
    anomaly!(9, Timeout, "Request timeout from 192.168.1.12", "2024-06-10 12:07:31", Medium),
    anomaly!(10, BadRequest, "Invalid payload structure", "2024-06-10 12:06:50", Low),
    anomaly!(11, Unauthorized, "Token validation failure", "2024-06-10 12:06:01", High),
    anomaly!(12, Other, "High frequency of PUT requests", "2024-06-10 12:05:14", Medium),
    anomaly!(13, BadRequest, "User-agent mismatch", "2024-06-10 12:04:32", Low),
    anomaly!(14, Timeout, "Upstream server timeout", "2024-06-10 12:03:44", Medium),
    anomaly!(15, Unauthorized, "Access token expired", "2024-06-10 12:02:59", Medium),
    anomaly!(16, BadRequest, "Frequent 400 status codes from bot traffic", "2024-06-10 12:02:12", High),
    anomaly!(17, Other, "Surge in OPTIONS requests", "2024-06-10 12:01:30", Low),
    anomaly!(18, Timeout, "Client took too long to respond", "2024-06-10 12:00:54", Medium),
    anomaly!(19, BadRequest, "Invalid query parameter in search", "2024-06-10 12:00:03", Low),
    anomaly!(20, Unauthorized, "Blocked IP attempting unauthorized access", "2024-06-10 11:59:21", High),
    anomaly!(21, Other, "Sudden drop in HEAD requests", "2024-06-10 11:58:45", Low),
    anomaly!(22, Timeout, "Connection timed out after 30 seconds", "2024-06-10 11:57:58", Medium),
    anomaly!(23, BadRequest, "Cross-origin request blocked", "2024-06-10 11:57:12", Medium),
    anomaly!(24, Unauthorized, "JWT signature mismatch", "2024-06-10 11:56:33", High),
    anomaly!(25, Other, "Suspiciously fast repeated requests from single user", "2024-06-10 11:55:47", High),
];

/// Anomaly counts per minute, labeled `HH:MM` and sorted by label.
pub fn anomaly_time_series() -> Vec<MetricSample> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for a in &ANOMALIES {
        let minute = a.timestamp.get(..16).unwrap_or(a.timestamp);
        *counts.entry(minute).or_default() += 1;
    }
    let mut series: Vec<MetricSample> = counts
        .into_iter()
        .map(|(minute, n)| MetricSample::new(minute.get(11..).unwrap_or(minute), n as f64))
        .collect();
    series.sort_by(|a, b| a.time.cmp(&b.time));
    series
}

/// Values appended to every series when a poll fails.
pub const FALLBACK_CPU: f64 = 16.36;
pub const FALLBACK_MEMORY: f64 = 89.11;
pub const FALLBACK_LATENCY: f64 = 10.0;
pub const FALLBACK_PROCESSES: u64 = 364;

/// Snapshot shown until the first successful poll.
pub fn fallback_snapshot() -> TelemetrySnapshot {
    TelemetrySnapshot {
        timestamp: None,
        cpu: CpuLoad {
            current_load: FALLBACK_CPU,
            user_load: 7.8,
            system_load: 7.99,
            irq_load: 0.5,
        },
        cpu_cores: vec![
            18.14, 17.46, 20.92, 16.9, 17.51, 15.58, 15.07, 15.19, 14.7, 14.52, 14.72, 15.57,
        ],
        memory: MemoryStats {
            total_mb: 7877.0,
            used_mb: 7019.0,
            free_mb: 858.0,
            usage_percent: FALLBACK_MEMORY,
        },
        uptime_seconds: 267487.265,
        system_metrics: SystemMetrics {
            disk: vec![DiskInfo {
                device: "\\\\.\\PHYSICALDRIVE0".to_string(),
                kind: "SSD".to_string(),
                name: "NVMe PM991a NVMe Samsung 512GB".to_string(),
                health: "Ok".to_string(),
                size_gb: 512.11,
            }],
            processes: ProcessStats {
                total: FALLBACK_PROCESSES,
                running: 0,
                blocked: 0,
                top_processes: vec![
                    ProcessInfo {
                        pid: 0,
                        name: "System Idle Process".to_string(),
                        cpu: 91.44,
                        memory: 0.0001,
                    },
                    ProcessInfo {
                        pid: 5092,
                        name: "MsMpEng.exe".to_string(),
                        cpu: 1.88,
                        memory: 2.23,
                    },
                ],
            },
        },
        functional_metrics: FunctionalMetrics {
            network_interfaces: vec![NetworkInterface {
                iface: "Wi-Fi".to_string(),
                ip4: "10.233.177.144".to_string(),
                mac: "78:af:08:7e:9e:f6".to_string(),
                speed_mbps: 516.5,
            }],
            traffic_analysis: vec![TrafficStats {
                iface: "Wi-Fi".to_string(),
                rx_bytes: 446_554_060,
                tx_bytes: 48_075_905,
                rx_sec: None,
                tx_sec: None,
                throughput_mbps: 0.0,
                is_spike: false,
                is_drop: true,
            }],
            latency_ms: FALLBACK_LATENCY,
        },
    }
}

pub const REMEDIATION_REPORT: &str = concat!(
    "\u{1FA7A} *System Health Summary*  \n",
    "- *Service-A latency* is high: 2100ms (threshold exceeded).  \n",
    "- *CPU usage* is at 85%, nearing saturation.  \n",
    "- *Memory pressure*: HIGH on node-4.  \n",
    "- Recent logs confirm latency spike and memory overuse.\n",
    "\n",
    "\u{2699} *Automated Remediation Actions (Already Performed)*  \n",
    "- \u{2705} Traffic *rerouted* from service-A to service-B.  \n",
    "- \u{2705} *Scaled* service-A: 3 new instances deployed.  \n",
    "\n",
    "\u{1F4D8} *Documentation Insight*  \n",
    "According to release note v2.3.1, Service-A has a known memory leak under high load.  \n",
    "Suggested fix: Apply patch v2.3.2 and monitor garbage collection metrics.\n",
    "\n",
    "\u{1F680} *Recommended Next Actions*  \n",
    "1. Monitor service-B for increased load and latency over next 5 min.  \n",
    "2. Apply patch v2.3.2 to service-A (based on doc insight).  \n",
    "3. Add autoscaling memory thresholds for node-4.  \n",
    "4. Create fallback routing rule to service-C if service-B degrades.  \n",
    "\n",
    "\u{1F4C8} *Optimization Tip*  \n",
    "Consider enabling adaptive routing weights in the service mesh (e.g., Istio) to avoid future rerouting delays.\n",
    "\n",
    "\u{1F4DD} Generated by: GenAI Remediation Assistant \u{2013} v1.0",
);
