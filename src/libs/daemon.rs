//! Daemon management for the watch command.
//!
//! Handles the background-process lifecycle: detached spawn, PID file
//! bookkeeping, signal-driven shutdown, and termination of a previous
//! instance when a new watch replaces it.

use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::session::FocusSession;
use crate::msg_error_anyhow;
use crate::{msg_error, msg_info, msg_warning};
use anyhow::Result;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

const PID_FILE: &str = "pomo-watch.pid";

/// Runs the focus session in the foreground with signal handling for
/// graceful shutdown.
pub async fn run_with_signal_handling(task_name: Option<String>) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    #[cfg(unix)]
    {
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigterm = signal(SignalKind::terminate()).expect(&Message::FailedToCreateSigtermHandler.to_string());
            let mut sigint = signal(SignalKind::interrupt()).expect(&Message::FailedToCreateSigintHandler.to_string());

            tokio::select! {
                _ = sigterm.recv() => {
                    msg_info!(Message::WatcherReceivedSigterm);
                }
                _ = sigint.recv() => {
                    msg_info!(Message::WatcherReceivedSigint);
                }
            }

            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(windows)]
    {
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    msg_info!(Message::WatcherReceivedCtrlC);
                }
                Err(e) => {
                    msg_error!(Message::WatcherCtrlCListenFailed(e.to_string()));
                }
            }

            let _ = shutdown_tx.send(());
        });
    }

    #[cfg(not(any(unix, windows)))]
    {
        msg_warning!(Message::WatcherSignalHandlingNotSupported);
    }

    let config = Config::read()?;

    // Presence and break-ended events flow through the session's select
    // loop; the power channel is held open here so an OS backend can be
    // attached without the loop seeing a closed channel.
    let (presence_tx, presence_rx) = mpsc::channel(64);
    let (break_ended_tx, break_ended_rx) = mpsc::channel(8);
    let (_power_tx, power_rx) = mpsc::channel(8);

    let session = FocusSession::new(&config, break_ended_tx, presence_tx)?;
    let session_handle = tokio::spawn(session.run(task_name, presence_rx, break_ended_rx, power_rx, shutdown_rx));

    match session_handle.await {
        Ok(Ok(())) => msg_info!(Message::SessionExitedNormally),
        Ok(Err(e)) => msg_error!(Message::SessionError(e.to_string())),
        Err(e) => msg_error!(Message::SessionTaskPanicked(e.to_string())),
    }

    // Clean up PID file on exit
    let pid_path = DataStorage::new().get_path(PID_FILE)?;
    if pid_path.exists() {
        let _ = std::fs::remove_file(&pid_path);
    }

    Ok(())
}

/// Spawns the watch as a detached background process, replacing any
/// instance already running.
pub fn spawn(task_name: Option<String>) -> Result<()> {
    let pid_path = DataStorage::new().get_path(PID_FILE)?;

    if pid_path.exists() {
        if let Ok(pid_str) = std::fs::read_to_string(&pid_path) {
            msg_info!(Message::WatcherStoppingExisting(pid_str.trim().to_string()));
            if let Err(e) = stop_internal() {
                msg_warning!(Message::WatcherFailedToStopExisting(e.to_string()));
                // The process may already be dead; drop the stale file.
                let _ = std::fs::remove_file(&pid_path);
            }
            std::thread::sleep(Duration::from_millis(1000));
        }
    }

    let current_exe = std::env::current_exe().map_err(|_| msg_error_anyhow!(Message::FailedToGetCurrentExecutable))?;

    let mut args = vec!["watch".to_string(), "--foreground".to_string()];
    if let Some(name) = task_name {
        args.push("--task".to_string());
        args.push(name);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let child = unsafe {
            std::process::Command::new(current_exe)
                .args(&args)
                .pre_exec(|| {
                    // Detach from the current session to become a daemon.
                    nix::unistd::setsid().map_err(std::io::Error::from)?;
                    Ok(())
                })
                .spawn()?
        };
        let pid = child.id();
        std::fs::write(pid_path, pid.to_string())?;
        msg_info!(Message::WatcherStarted(pid));
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x08000000;
        let child = std::process::Command::new(current_exe).args(&args).creation_flags(CREATE_NO_WINDOW).spawn()?;
        let pid = child.id();
        std::fs::write(pid_path, pid.to_string())?;
        msg_info!(Message::WatcherStarted(pid));
    }

    #[cfg(not(any(unix, windows)))]
    {
        crate::msg_bail_anyhow!(Message::DaemonModeNotSupported);
    }

    Ok(())
}

/// Finds and stops the running daemon process.
pub fn stop() -> Result<()> {
    match stop_internal() {
        Ok(()) => Ok(()),
        Err(e) => {
            if e.to_string().contains("not found") || e.to_string().contains("not running") {
                msg_info!(Message::WatcherNotRunning);
                Ok(())
            } else {
                Err(e)
            }
        }
    }
}

fn stop_internal() -> Result<()> {
    let pid_path = DataStorage::new().get_path(PID_FILE)?;
    if !pid_path.exists() {
        crate::msg_bail_anyhow!(Message::WatcherNotRunningPidNotFound);
    }

    let pid_str = std::fs::read_to_string(&pid_path)?;
    let pid: u32 = pid_str.trim().parse().map_err(|_| msg_error_anyhow!(Message::InvalidPidFileContent))?;

    let killed = kill_process(pid)?;

    // Drop the PID file whether or not the process was still around.
    std::fs::remove_file(pid_path)?;

    if killed {
        msg_info!(Message::WatcherStopped(pid));
        Ok(())
    } else {
        crate::msg_bail_anyhow!(Message::WatcherFailedToStop(pid));
    }
}

#[cfg(windows)]
fn kill_process(pid: u32) -> Result<bool> {
    use winapi::um::errhandlingapi::GetLastError;
    use winapi::um::handleapi::CloseHandle;
    use winapi::um::processthreadsapi::{OpenProcess, TerminateProcess};
    use winapi::um::winnt::PROCESS_TERMINATE;

    unsafe {
        let handle = OpenProcess(PROCESS_TERMINATE, 0, pid);
        if handle.is_null() {
            let error = GetLastError();
            if error == 87 {
                // ERROR_INVALID_PARAMETER: no such process.
                return Ok(false);
            }
            crate::msg_bail_anyhow!(Message::FailedToOpenProcess(error));
        }

        let result = TerminateProcess(handle, 0);
        CloseHandle(handle);

        if result == 0 {
            let error = GetLastError();
            crate::msg_bail_anyhow!(Message::FailedToTerminateProcess(error));
        } else {
            std::thread::sleep(Duration::from_millis(100));
            Ok(true)
        }
    }
}

#[cfg(unix)]
fn kill_process(pid: u32) -> Result<bool> {
    use std::process::Command;

    let output = Command::new("ps").arg("-p").arg(pid.to_string()).output()?;

    if !output.status.success() {
        return Ok(false);
    }

    // SIGTERM first, SIGKILL only if the process lingers.
    Command::new("kill").arg("-TERM").arg(pid.to_string()).output()?;

    for _ in 0..10 {
        std::thread::sleep(Duration::from_millis(100));

        let check = Command::new("ps").arg("-p").arg(pid.to_string()).output()?;

        if !check.status.success() {
            return Ok(true);
        }
    }

    Command::new("kill").arg("-9").arg(pid.to_string()).output()?;

    std::thread::sleep(Duration::from_millis(100));
    Ok(true)
}

#[cfg(not(any(unix, windows)))]
fn kill_process(_pid: u32) -> Result<bool> {
    crate::msg_bail_anyhow!(Message::ProcessTerminationNotSupported);
}
