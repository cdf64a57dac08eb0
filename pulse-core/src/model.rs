//! Wire model for the `/healthcheck` telemetry payload.
//!
//! Every record field the dashboard reads is required, so a payload that is
//! missing one fails to deserialize and is handled like any other failed poll.
//! Entries inside the disk, process and network arrays are lenient.

use serde::{Deserialize, Serialize};

/// Latest full telemetry record. Replaced wholesale on every successful poll.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySnapshot {
    #[serde(default)]
    pub timestamp: Option<String>,
    pub cpu: CpuLoad,
    pub cpu_cores: Vec<f64>,
    pub memory: MemoryStats,
    pub uptime_seconds: f64,
    pub system_metrics: SystemMetrics,
    pub functional_metrics: FunctionalMetrics,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuLoad {
    pub current_load: f64,
    pub user_load: f64,
    pub system_load: f64,
    pub irq_load: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    #[serde(rename = "totalMB")]
    pub total_mb: f64,
    #[serde(rename = "usedMB")]
    pub used_mb: f64,
    #[serde(rename = "freeMB")]
    pub free_mb: f64,
    #[serde(rename = "usagePercent")]
    pub usage_percent: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemMetrics {
    pub disk: Vec<DiskInfo>,
    pub processes: ProcessStats,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskInfo {
    pub device: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub health: String,
    #[serde(rename = "sizeGB")]
    pub size_gb: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStats {
    pub total: u64,
    pub running: u64,
    pub blocked: u64,
    pub top_processes: Vec<ProcessInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessInfo {
    pub pid: u64,
    pub name: String,
    pub cpu: f64,
    pub memory: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionalMetrics {
    pub network_interfaces: Vec<NetworkInterface>,
    pub traffic_analysis: Vec<TrafficStats>,
    pub latency_ms: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkInterface {
    pub iface: String,
    pub ip4: String,
    pub mac: String,
    pub speed_mbps: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrafficStats {
    pub iface: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    pub rx_sec: Option<f64>,
    pub tx_sec: Option<f64>,
    pub throughput_mbps: f64,
    pub is_spike: bool,
    pub is_drop: bool,
}

impl TelemetrySnapshot {
    /// Parse and validate a response body.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    pub fn cpu_percent(&self) -> f64 {
        self.cpu.current_load
    }

    pub fn mem_percent(&self) -> f64 {
        self.memory.usage_percent
    }

    pub fn latency_ms(&self) -> f64 {
        self.functional_metrics.latency_ms
    }

    pub fn process_count(&self) -> u64 {
        self.system_metrics.processes.total
    }

    pub fn primary_disk(&self) -> Option<&DiskInfo> {
        self.system_metrics.disk.first()
    }

    pub fn primary_interface(&self) -> Option<&NetworkInterface> {
        self.functional_metrics.network_interfaces.first()
    }

    pub fn top_process(&self) -> Option<&ProcessInfo> {
        self.system_metrics.processes.top_processes.first()
    }
}
