// Director domain models
//
// Payloads carried in the envelope `data` field. Wire names are camelCase
// with a few irregular spellings kept as the director sends them. Every
// field is optional on read because the director omits whatever does not
// apply to a job type or platform; absent fields are also left off on write.

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// `null` and a missing field both read as an empty list.
fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items = Option::<Vec<T>>::deserialize(deserializer)?;
    Ok(items.unwrap_or_default())
}

// ── Authentication ───────────────────────────────────────────────────

/// Result of `AuthenticationManagement.login`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginInfo {
    /// `"OK"` when the credentials were accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    /// Why the login was refused, when it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// First login since the director was installed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_time: Option<bool>,

    /// Initial configuration wizard has been completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_configured: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_info: Option<UserInfo>,

    /// Lockout state after failed attempts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_try: Option<CanTry>,
}

impl LoginInfo {
    /// The director accepted the credentials.
    pub fn is_success(&self) -> bool {
        self.result.as_deref() == Some("OK")
    }
}

/// Profile of the authenticated user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_master_admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(deserialize_with = "nullable_vec", skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "firstloginRelative", skip_serializing_if = "Option::is_none")]
    pub first_login_relative: Option<i64>,
}

/// Brute-force lockout information returned with every login.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanTry {
    /// Another attempt is allowed right now.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_possible: Option<bool>,

    /// Time until the next attempt is allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_time_left: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_attempts: Option<i64>,
}

// ── Job groups ───────────────────────────────────────────────────────

/// Result of `JobSummaryManagement.getGroupInfo`: the job-group tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupInfo {
    #[serde(deserialize_with = "nullable_vec")]
    pub children: Vec<JobGroup>,
}

/// A job group (folder) and the aggregate state of the jobs inside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vid: Option<String>,

    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Number of jobs in the group, by job type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_count: Option<JobCount>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_count_enabled: Option<i64>,

    /// Jobs that don't violate the license.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_count_licensed: Option<i64>,

    /// Backups per platform. Undocumented shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hv_type_backup_count: Option<Value>,

    /// AWS only: backups whose recovery points include a root volume.
    /// Undocumented shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hv_type_backup_has_root_disk_count: Option<Value>,

    /// Machines processed by jobs in the group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vm_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_count: Option<i64>,

    /// Total size of the processed sources, in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources_size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_removed: Option<bool>,

    /// Jobs running right now.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_job_running: Option<i64>,

    /// Machines being processed right now.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_vm_running: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_last_run: Option<bool>,

    /// Jobs whose last run succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_job_ok: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_job_failed: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_job_stopped: Option<i64>,

    /// All jobs below this group, recursively.
    #[serde(deserialize_with = "nullable_vec", skip_serializing_if = "Vec::is_empty")]
    pub child_job_ids: Vec<i64>,

    /// Direct children only.
    #[serde(deserialize_with = "nullable_vec", skip_serializing_if = "Vec::is_empty")]
    pub immediate_child_job_ids: Vec<i64>,

    #[serde(deserialize_with = "nullable_vec", skip_serializing_if = "Vec::is_empty")]
    pub transporters: Vec<Transporter>,

    #[serde(deserialize_with = "nullable_vec", skip_serializing_if = "Vec::is_empty")]
    pub storages: Vec<Storage>,
}

/// Per-type job counters inside a [`JobGroup`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct JobCount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replication: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_vms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_files: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_backups: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_copy: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash_boot: Option<i64>,
}

impl JobCount {
    /// Jobs of every type.
    pub fn total(&self) -> i64 {
        [
            self.replication,
            self.backup,
            self.recovery_vms,
            self.recovery_files,
            self.recovery_backups,
            self.backup_copy,
            self.flash_boot,
        ]
        .into_iter()
        .flatten()
        .sum()
    }
}

/// A transporter (data mover) used by a job or group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Transporter {
    /// Assigned automatically rather than pinned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_auto: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_as_source: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_as_target: Option<bool>,

    /// Maximum number of concurrent tasks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_load_factor: Option<i64>,

    /// Tasks currently running on it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_total_load: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// A backup repository used by a job or group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Storage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Capacity in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub free: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub used: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub online: Option<bool>,

    /// AWS only: EBS or EBS snapshot storage without a fixed size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infinite_size: Option<bool>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<String>,
}

// ── Jobs ─────────────────────────────────────────────────────────────

/// Result of `JobSummaryManagement.getJobInfo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobInfo {
    #[serde(deserialize_with = "nullable_vec")]
    pub children: Vec<Job>,
}

/// Detailed job record from `JobSummaryManagement.getJobInfo`.
///
/// Enumerated fields are kept as strings; the director adds values between
/// releases. The documented values are listed on each field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Job {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Platform type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hv_type: Option<String>,

    /// Machines per platform. Undocumented shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hv_type_backup_count: Option<Value>,

    /// AWS only: recovery points that include a root volume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hv_type_backup_has_root_disk_count: Option<Value>,

    /// `REPLICATION`, `BACKUP`, `RECOVERY_VMS`, `RECOVERY_FILES`, `RECOVERY_OBJECTS`,
    /// `BACKUP_COPY`, `FLASH_BOOT`, `REPLICA_FAILOVER`, `SITE_RECOVERY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Replication only: replicating from a backup rather than from a machine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_backup: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub added: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vm_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_count: Option<i64>,

    /// Total size of the source machines, in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources_size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,

    /// The job does not violate the license.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_licensed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_edited: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_removed: Option<bool>,

    /// Why the job is locked, when it is.
    #[serde(deserialize_with = "nullable_vec", skip_serializing_if = "Vec::is_empty")]
    pub lock_reasons: Vec<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_duration_ms: Option<i64>,

    /// Runs that `average_duration_ms` was computed from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_duration_sample_count: Option<i64>,

    /// `WAITING_DEMAND`, `WAITING_SCHEDULE`, `RUNNING`, `OK`, `FAILED`, `STOPPED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_state: Option<String>,

    /// Start of the current run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_date: Option<String>,

    /// Time elapsed since the current run started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_date_relative: Option<i64>,

    /// Machines queued in the current run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_vm_planned: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_vm_ok: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_vm_failed: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_vm_stopped: Option<i64>,

    /// Progress of the current run, in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_progress: Option<i64>,

    /// The current run was started manually.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_adhoc: Option<bool>,

    /// Site recovery only: `TEST` or `RUN`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_site_recovery_run_type: Option<String>,

    /// Site recovery only: `MINUTE` or `HOUR`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_recovery_time_objective_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_recovery_time_objective: Option<i64>,

    /// Site recovery only: `PLANNED_FAILOVER` or `EMERGENCY_FAILOVER`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_failover_type: Option<String>,

    #[serde(deserialize_with = "nullable_vec", skip_serializing_if = "Vec::is_empty")]
    pub cr_action_executions: Vec<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_last_run: Option<bool>,

    /// `WAITING_DEMAND`, `WAITING_SCHEDULE`, `RUNNING`, `OK`, `FAILED`, `STOPPED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_state: Option<String>,

    /// Start of the last run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_date: Option<String>,

    /// End of the last run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_finish_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_speed: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_duration_ms: Option<i64>,

    /// Data transferred in the last run, in KiB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_data_kb: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_vm_ok: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_vm_failed: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_vm_stopped: Option<i64>,

    /// The last run was started manually.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_adhoc: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_compression_ratio: Option<f64>,

    /// Site recovery only: `TEST` or `RUN`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_site_recovery_run_type: Option<String>,

    /// Site recovery only: `MINUTE` or `HOUR`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_recovery_time_objective_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_recovery_time_objective: Option<i64>,

    /// Site recovery only: `PLANNED_FAILOVER` or `EMERGENCY_FAILOVER`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_failover_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_action_failed: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_action_skipped: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_action_succeed: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_action_stopped: Option<i64>,

    #[serde(deserialize_with = "nullable_vec", skip_serializing_if = "Vec::is_empty")]
    pub lr_action_executions: Vec<Value>,

    /// Site recovery actions. Undocumented shape.
    #[serde(
        rename = "action",
        deserialize_with = "nullable_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub actions: Vec<Value>,

    /// `ALWAYS`, `EVERY`, `EVERY2ND`, `FIRST`, `SECOND`, `THIRD`, `FOURTH`, `LAST`,
    /// `DAY`, `EVERY_JOB_RUNS`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_backup_run_settings_type: Option<String>,

    /// `SYNTHETIC` or `ACTIVE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_backup_mode: Option<String>,

    /// `MINUTE` or `HOUR`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_time_objective_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_time_objective: Option<i64>,

    /// Change tracking for forever-incremental backups: `NONE`, `HYPERVISOR`,
    /// `DOUBLE_CHECK`, `PROPRIETARY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub differential_tracking_mode: Option<String>,

    /// `NEVER` or `ALWAYS`.
    #[serde(rename = "preScriptExecutionmode", skip_serializing_if = "Option::is_none")]
    pub pre_script_execution_mode: Option<String>,

    /// `NONE`, `WAIT`, `PROCEED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_script_behavior: Option<String>,

    /// `NONE`, `FAIL`, `SKIP`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_script_error_mode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_script_path: Option<String>,

    /// `NEVER` or `ALWAYS`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_script_execution_mode: Option<String>,

    /// `NONE`, `WAIT`, `PROCEED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_script_behavior: Option<String>,

    /// `NONE`, `FAIL`, `SKIP`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_script_error_mode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_script_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_source_vms_off: Option<bool>,

    /// `NONE`, `ALWAYS`, `JOB_SUCCESS`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_log_truncation_mode: Option<String>,

    /// `NONE`, `ALWAYS`, `JOB_SUCCESS`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_log_truncation_mode: Option<String>,

    /// Replication only: `AUTO` or `FORCE_THIN`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thin_disk_mode: Option<String>,

    /// AWS only: `AUTO` or `FORCE_MAGNETIC`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebs_volume_mode: Option<String>,

    /// AWS only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporary_volume_type: Option<String>,

    /// `NONE`, `AUTO`, `FAST`, `MEDIUM`, `BEST`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_acceleration_mode: Option<String>,

    /// `NONE` or `NORMAL`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_mode: Option<String>,

    /// `NONE`, `VSS_IGNORE_ERRORS`, `VSS_FAIL_ON_ERRORS`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_aware_mode: Option<String>,

    /// `AUTO`, `SAN`, `LAN`, `HOT_ADD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transporter_mode: Option<String>,

    /// `NEVER` or `ALWAYS`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_verification_mode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_policy: Option<RetentionPolicy>,

    /// Recovery only: power on recovered machines when the job completes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_vms_on: Option<bool>,

    /// Recovery only: give recovered machines a new MAC address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_mac: Option<bool>,

    /// `SYNTHETIC` or `PRODUCTION`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_type: Option<String>,

    /// Source machines and their per-run state.
    #[serde(deserialize_with = "nullable_vec", skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<JobObject>,

    #[serde(deserialize_with = "nullable_vec", skip_serializing_if = "Vec::is_empty")]
    pub transporters: Vec<Transporter>,

    #[serde(deserialize_with = "nullable_vec", skip_serializing_if = "Vec::is_empty")]
    pub storages: Vec<Storage>,

    #[serde(deserialize_with = "nullable_vec", skip_serializing_if = "Vec::is_empty")]
    pub schedules: Vec<Schedule>,
}

impl Job {
    /// A run is in progress.
    pub fn is_running(&self) -> bool {
        self.cr_state.as_deref() == Some("RUNNING")
    }

    /// The last finished run failed.
    pub fn last_run_failed(&self) -> bool {
        self.has_last_run == Some(true) && self.lr_state.as_deref() == Some("FAILED")
    }
}

/// A machine processed by a job, with source, target, and run state.
///
/// Run states are one of `SCHEDULED`, `DEMAND`, `WAITING`, `RUNNING`,
/// `STOPPED`, `FAILED`, `SUCCEEDED`, `SKIPPED`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_vid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,

    /// `ON`, `OFF`, `SUSPENDED`, `UNKNOWN`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_power_state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_sub_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_vid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,

    /// `ON`, `OFF`, `SUSPENDED`, `UNKNOWN`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_power_state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_sub_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_progress: Option<i64>,

    /// Bytes per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_speed: Option<i64>,

    /// Bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_data_transferred_uncompressed: Option<i64>,

    /// Milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_duration: Option<i64>,

    /// Bits per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cr_bandwidth_limit: Option<i64>,

    /// `AUTO`, `SAN`, `LAN`, `HOT_ADD`.
    #[serde(deserialize_with = "nullable_vec", skip_serializing_if = "Vec::is_empty")]
    pub cr_transporter_modes: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_speed: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_data_transferred_uncompressed: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_duration: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_bandwidth_limit: Option<i64>,

    /// `AUTO`, `SAN`, `LAN`, `HOT_ADD`.
    #[serde(deserialize_with = "nullable_vec", skip_serializing_if = "Vec::is_empty")]
    pub lr_transporter_modes: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_path: Option<String>,

    /// `WAITING`, `STARTING`, `RUNNING_VM`, `FAILED`, `DISCARDING`, `DISCARDED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash_boot_state: Option<String>,
}

/// How many recovery points a job keeps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetentionPolicy {
    #[serde(rename = "retentionMode", skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_day_count: Option<i64>,
    #[serde(rename = "keepWeekcount", skip_serializing_if = "Option::is_none")]
    pub keep_week_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_month_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_year_count: Option<i64>,
}

/// A job schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Schedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// `DAILY`, `PERIODICALLY`, `NONE`, `MONTHLY_YEARLY`, `TRIGGER`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schedule_type: Option<String>,

    /// Priority among the job's schedules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,

    /// `hh:mm:ss AM/PM`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone_offset_ms: Option<i64>,

    /// Weekday bit mask: lowest bit Monday, seventh bit Sunday (`1..=127`).
    /// See [`Schedule::runs_on`].
    #[serde(rename = "on", skip_serializing_if = "Option::is_none")]
    pub weekday_mask: Option<i64>,

    /// Delay unit for `PERIODICALLY` and `TRIGGER` schedules: `DAY`, `SECOND`,
    /// `MINUTE`, `HOUR`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub every_type: Option<String>,

    /// Number of `every_type` units between runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub every: Option<i64>,

    /// `FIRST`, `SECOND`, `THIRD`, `FOURTH`, `LAST`, `DAY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_every_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<i64>,

    /// VID of the job that triggers this one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_item: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_item_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_item_type_name: Option<String>,

    /// Run right after the trigger or after an `every`/`every_type` delay.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_run_type: Option<String>,

    /// `RUN_SUCCESS`, `RUN_FAILURE`, `RUN_STOP`.
    #[serde(deserialize_with = "nullable_vec", skip_serializing_if = "Vec::is_empty")]
    pub trigger_events: Vec<String>,

    /// `YYYY-MM-DDTHH:MM:SS.SSSZ`. See [`Schedule::next_run_at`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_run: Option<String>,

    /// Milliseconds until the next run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_run_relative: Option<i64>,

    /// Start of validity; absent means effective immediately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
}

impl Schedule {
    /// Whether the weekday bit for `day` is set in `weekday_mask`.
    ///
    /// A schedule without a mask runs on no particular weekday.
    pub fn runs_on(&self, day: Weekday) -> bool {
        self.weekday_mask
            .is_some_and(|mask| mask & (1_i64 << day.num_days_from_monday()) != 0)
    }

    /// `next_run` as a timestamp, if present and well formed.
    pub fn next_run_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.next_run.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn login_info_from_wire() {
        let info: LoginInfo = serde_json::from_value(json!({
            "result": "OK",
            "firstTime": false,
            "productConfigured": true,
            "userInfo": {
                "id": 7,
                "name": "alice",
                "isAdmin": true,
                "permissions": ["JOB_VIEW", "JOB_RUN"],
                "firstloginRelative": 120
            },
            "canTry": { "isPossible": true, "waitTimeLeft": 0, "failedAttempts": 0 }
        }))
        .unwrap();

        assert!(info.is_success());
        let user = info.user_info.unwrap();
        assert_eq!(user.id, Some(7));
        assert_eq!(user.is_admin, Some(true));
        assert_eq!(user.is_master_admin, None);
        assert_eq!(user.permissions, vec!["JOB_VIEW", "JOB_RUN"]);
        assert_eq!(user.first_login_relative, Some(120));
        assert_eq!(info.can_try.unwrap().is_possible, Some(true));
    }

    #[test]
    fn refused_login_is_not_success() {
        let info: LoginInfo = serde_json::from_value(json!({
            "result": "FAILED",
            "reason": "WRONG_CREDENTIALS",
            "canTry": { "isPossible": false, "waitTimeLeft": 30000, "failedAttempts": 5 }
        }))
        .unwrap();

        assert!(!info.is_success());
        assert_eq!(info.can_try.unwrap().wait_time_left, Some(30000));
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let info = LoginInfo {
            result: Some("OK".into()),
            user_info: Some(UserInfo {
                id: Some(7),
                ..UserInfo::default()
            }),
            ..LoginInfo::default()
        };

        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            json!({ "result": "OK", "userInfo": { "id": 7 } })
        );
    }

    #[test]
    fn null_lists_read_as_empty() {
        let group: JobGroup = serde_json::from_value(json!({
            "id": 3,
            "childJobIds": null,
            "transporters": null
        }))
        .unwrap();

        assert!(group.child_job_ids.is_empty());
        assert!(group.transporters.is_empty());
        assert!(group.storages.is_empty());
    }

    #[test]
    fn job_count_uses_screaming_case_keys() {
        let count: JobCount = serde_json::from_value(json!({
            "BACKUP": 4,
            "REPLICATION": 2,
            "RECOVERY_VMS": 0,
            "BACKUP_COPY": 1
        }))
        .unwrap();

        assert_eq!(count.backup, Some(4));
        assert_eq!(count.backup_copy, Some(1));
        assert_eq!(count.flash_boot, None);
        assert_eq!(count.total(), 7);
    }

    #[test]
    fn irregular_wire_names() {
        let job: Job = serde_json::from_value(json!({
            "id": 11,
            "preScriptExecutionmode": "ALWAYS",
            "exchangeLogTruncationMode": "JOB_SUCCESS",
            "action": [{ "type": "WAIT" }],
            "retentionPolicy": { "retentionMode": "GFS", "keepWeekcount": 4 },
            "storages": [{ "vid": "st-1", "type": "LOCAL_FOLDER", "free": 1024 }]
        }))
        .unwrap();

        assert_eq!(job.pre_script_execution_mode.as_deref(), Some("ALWAYS"));
        assert_eq!(
            job.exchange_log_truncation_mode.as_deref(),
            Some("JOB_SUCCESS")
        );
        assert_eq!(job.actions.len(), 1);

        let policy = job.retention_policy.unwrap();
        assert_eq!(policy.mode.as_deref(), Some("GFS"));
        assert_eq!(policy.keep_week_count, Some(4));

        assert_eq!(
            job.storages[0].storage_type.as_deref(),
            Some("LOCAL_FOLDER")
        );
    }

    #[test]
    fn job_state_helpers() {
        let job = Job {
            cr_state: Some("RUNNING".into()),
            has_last_run: Some(true),
            lr_state: Some("FAILED".into()),
            ..Job::default()
        };
        assert!(job.is_running());
        assert!(job.last_run_failed());

        let fresh = Job {
            lr_state: Some("FAILED".into()),
            ..Job::default()
        };
        assert!(!fresh.is_running());
        assert!(!fresh.last_run_failed());
    }

    #[test]
    fn weekday_mask_lowest_bit_is_monday() {
        // 0b0011111: weekdays only
        let raw = json!({ "type": "DAILY", "on": 31 });
        let schedule: Schedule = serde_json::from_value(raw).unwrap();

        assert_eq!(schedule.schedule_type.as_deref(), Some("DAILY"));
        assert!(schedule.runs_on(Weekday::Mon));
        assert!(schedule.runs_on(Weekday::Fri));
        assert!(!schedule.runs_on(Weekday::Sat));
        assert!(!schedule.runs_on(Weekday::Sun));

        assert!(!Schedule::default().runs_on(Weekday::Mon));
    }

    #[test]
    fn next_run_parses_director_timestamps() {
        let schedule = Schedule {
            next_run: Some("2024-03-09T22:00:00.000Z".into()),
            ..Schedule::default()
        };
        let at = schedule.next_run_at().unwrap();
        assert_eq!(at.to_rfc3339(), "2024-03-09T22:00:00+00:00");

        let garbage = Schedule {
            next_run: Some("tomorrow".into()),
            ..Schedule::default()
        };
        assert!(garbage.next_run_at().is_none());
    }
}
