use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use super::{AudioProcessor, ClipSpec};
use crate::error::{Error, Result};

/// Audio work delegated to an `ffmpeg` executable
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    program: PathBuf,
}

impl Ffmpeg {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments converting `source` to an Ogg file at `target`
    pub fn transcode_args(source: &Path, target: &Path) -> Vec<OsString> {
        let mut args = Self::common_args();
        args.extend(["-i".into(), source.into()]);
        args.extend(["-f".into(), "ogg".into(), target.into()]);
        args
    }

    /// Arguments cutting `clip` out of `source`, seeking on the input side
    pub fn clip_args(source: &Path, target: &Path, clip: &ClipSpec) -> Vec<OsString> {
        let filters = format!(
            "afade=t=in:ss=0:d={fade},afade=t=out:st={out}:d={fade}",
            fade = clip.fade_secs,
            out = clip.fade_out_start()
        );

        let mut args = Self::common_args();
        args.extend(["-ss".into(), clip.start_secs.to_string().into()]);
        args.extend(["-i".into(), source.into()]);
        args.extend(["-t".into(), clip.duration_secs.to_string().into()]);
        args.extend(["-af".into(), filters.into(), target.into()]);
        args
    }

    fn common_args() -> Vec<OsString> {
        ["-y", "-hide_banner", "-loglevel", "error"]
            .into_iter()
            .map(OsString::from)
            .collect()
    }

    fn run(&self, args: Vec<OsString>, target: &Path) -> Result<()> {
        debug!("Running {:?} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Error::Transcode {
                target: display_name(target),
                message: format!("failed to execute {:?}: {}", self.program, e),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("no output");
        Err(Error::Transcode {
            target: display_name(target),
            message: format!("ffmpeg exited with {}: {}", output.status, detail.trim()),
        })
    }
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl AudioProcessor for Ffmpeg {
    fn transcode(&self, source: &Path, target: &Path) -> Result<()> {
        self.run(Self::transcode_args(source, target), target)
    }

    fn clip(&self, source: &Path, target: &Path, clip: &ClipSpec) -> Result<()> {
        self.run(Self::clip_args(source, target, clip), target)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_transcode_args() {
        let args = strings(Ffmpeg::transcode_args(Path::new("in.mp3"), Path::new("base.ogg")));
        assert_eq!(
            args,
            ["-y", "-hide_banner", "-loglevel", "error", "-i", "in.mp3", "-f", "ogg", "base.ogg"]
        );
    }

    #[test]
    fn test_clip_args() {
        let clip = ClipSpec {
            start_secs: 90,
            duration_secs: 20,
            fade_secs: 1,
        };
        let args = strings(Ffmpeg::clip_args(Path::new("base.ogg"), Path::new("preview.ogg"), &clip));

        assert_eq!(&args[4..6], ["-ss", "90"]);
        assert_eq!(&args[8..10], ["-t", "20"]);
        assert_eq!(args[11], "afade=t=in:ss=0:d=1,afade=t=out:st=19:d=1");
        assert_eq!(args.last().unwrap(), "preview.ogg");
    }

    #[test]
    fn test_missing_program_is_transcode_error() {
        let ffmpeg = Ffmpeg::new("/nonexistent/ffmpeg-binary");
        let err = ffmpeg
            .transcode(Path::new("in.mp3"), Path::new("/tmp/base.ogg"))
            .unwrap_err();
        match err {
            Error::Transcode { target, .. } => assert_eq!(target, "base.ogg"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
