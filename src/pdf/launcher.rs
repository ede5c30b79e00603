//! Isolated browser acquisition shared by both backends.
//!
//! Every materialization gets its own Chrome process and its own scoped
//! working directory; nothing is shared between concurrent requests. Launch
//! slots are bounded; when all are busy the request fails fast instead of
//! queuing. The RAII types guarantee teardown on every exit path: dropping
//! [`LoadedPage`] closes the tab references, kills the browser process and
//! then removes the temp directory; dropping [`LaunchSlot`] frees the slot.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions, Tab};
use parking_lot::Mutex;
use tempfile::TempDir;

use super::MaterializeError;

pub struct ChromeLauncher {
    chrome_path: Option<PathBuf>,
    timeout: Duration,
    max_instances: usize,
    active: Mutex<usize>,
}

/// A held launch slot; freed on drop.
pub struct LaunchSlot<'a> {
    launcher: &'a ChromeLauncher,
}

impl Drop for LaunchSlot<'_> {
    fn drop(&mut self) {
        let mut active = self.launcher.active.lock();
        *active = active.saturating_sub(1);
    }
}

/// A live page with the markup loaded. Field order is drop order: tab
/// first, then the browser process, then the working directory.
pub struct LoadedPage {
    pub tab: Arc<Tab>,
    _browser: Browser,
    _workdir: TempDir,
}

impl ChromeLauncher {
    pub fn new(chrome_path: Option<PathBuf>, timeout: Duration, max_instances: usize) -> Self {
        Self {
            chrome_path,
            timeout,
            max_instances: max_instances.max(1),
            active: Mutex::new(0),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Claim a launch slot or fail fast when capacity is exhausted.
    pub fn acquire(&self) -> Result<LaunchSlot<'_>, MaterializeError> {
        let mut active = self.active.lock();
        if *active >= self.max_instances {
            return Err(MaterializeError::CapacityExceeded {
                limit: self.max_instances,
            });
        }
        *active += 1;
        Ok(LaunchSlot { launcher: self })
    }

    /// Write the markup to a scoped temp file, launch an isolated browser
    /// and navigate to it. The document is self-contained, so a settled
    /// navigation means the page is fully laid out.
    pub fn load_markup(
        &self,
        markup: &str,
        window_size: Option<(u32, u32)>,
    ) -> Result<LoadedPage, MaterializeError> {
        let workdir = tempfile::tempdir().map_err(MaterializeError::TempDir)?;
        let page_path = workdir.path().join("quotation.html");
        fs::write(&page_path, markup).map_err(MaterializeError::WriteMarkup)?;

        let browser = Browser::new(LaunchOptions {
            headless: true,
            // Containers routinely lack the kernel features the sandbox needs.
            sandbox: false,
            window_size,
            path: self.chrome_path.clone(),
            idle_browser_timeout: self.timeout,
            ..Default::default()
        })
        .map_err(|e| MaterializeError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| MaterializeError::LaunchFailed(e.to_string()))?;
        tab.set_default_timeout(self.timeout);

        let url = format!("file://{}", page_path.display());
        tab.navigate_to(&url)
            .and_then(|t| t.wait_until_navigated())
            .map_err(|e| MaterializeError::Navigation(e.to_string()))?;

        Ok(LoadedPage {
            tab,
            _browser: browser,
            _workdir: workdir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launcher(max: usize) -> ChromeLauncher {
        ChromeLauncher::new(None, Duration::from_secs(5), max)
    }

    #[test]
    fn slots_fail_fast_at_capacity() {
        let launcher = launcher(2);
        let first = launcher.acquire().unwrap();
        let _second = launcher.acquire().unwrap();
        assert!(matches!(
            launcher.acquire(),
            Err(MaterializeError::CapacityExceeded { limit: 2 })
        ));
        drop(first);
        assert!(launcher.acquire().is_ok());
    }

    #[test]
    fn dropping_a_slot_always_releases_it() {
        let launcher = launcher(1);
        for _ in 0..5 {
            let slot = launcher.acquire().unwrap();
            drop(slot);
        }
        assert_eq!(*launcher.active.lock(), 0);
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let launcher = launcher(0);
        assert!(launcher.acquire().is_ok());
    }
}
