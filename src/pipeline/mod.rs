pub mod discover;
pub mod error;
pub mod select;

pub use discover::discover;
pub use error::BtdError;
pub use select::{MatchedTime, TimePair, matched_times, select_pair};

use std::path::{Path, PathBuf};

use crate::config::{Config, DisplayRange};
use crate::grid::Grid;
use crate::keys::{FileRecord, TimeToken, group_records};
use crate::readers::GridReader;
use crate::writers::{ArtifactSink, file_stem};

const BT_UNITS: &str = "K";
const SUMMARY_LIMIT: usize = 4;

/// Both channels for one scan time, loaded.
#[derive(Debug)]
struct Scene {
    tag: &'static str,
    token: TimeToken,
    short_wave: Grid,
    long_wave: Grid,
}

/// What a successful run produced.
#[derive(Debug)]
pub struct RunReport {
    pub t1: TimeToken,
    pub t2: TimeToken,
    pub images: Vec<PathBuf>,
    pub arrays: Vec<PathBuf>,
}

/// Select -> load -> compute -> emit, once, failing on the first error.
pub struct BtdPipeline<R, S> {
    config: Config,
    reader: R,
    sink: S,
}

impl<R: GridReader, S: ArtifactSink> BtdPipeline<R, S> {
    pub fn new(config: Config, reader: R, sink: S) -> Self {
        Self {
            config,
            reader,
            sink,
        }
    }

    pub fn run(&mut self) -> Result<RunReport, BtdError> {
        let pair = self.select()?;

        let scenes = [self.load("t1", &pair.t1)?, self.load("t2", &pair.t2)?];

        let btds = [self.btd(&scenes[0])?, self.btd(&scenes[1])?];
        let delta = btds[1].minus(&btds[0], "ΔBTD (t2 − t1)", BT_UNITS)?;

        for (scene, btd) in scenes.iter().zip(&btds) {
            println!("{}", report_range(scene.tag, btd));
        }

        let mut images = Vec::new();
        for (scene, btd) in scenes.iter().zip(&btds) {
            for (grid, title, range) in self.scene_fields(scene, btd) {
                images.push(self.emit_image(grid, &title, &range)?);
            }
        }
        let ranges = *self.config.ranges();
        images.push(self.emit_image(
            &delta,
            &format!("BTD_diff_t2_minus_t1 ({})", delta.units()),
            &ranges.delta,
        )?);

        let mut arrays = Vec::new();
        for (scene, btd) in scenes.iter().zip(&btds) {
            let path = self.output_path(&format!("BTD_{}.nc", scene.tag));
            self.sink.write_array(btd, &path)?;
            println!("{}", wrote(&path));
            arrays.push(path);
        }

        let [t1, t2] = scenes.map(|s| s.token);
        Ok(RunReport {
            t1,
            t2,
            images,
            arrays,
        })
    }

    fn select(&self) -> Result<TimePair, BtdError> {
        let files = discover(&self.config)?;

        let records = files
            .iter()
            .map(|f| FileRecord::from_path(f, self.config.grammar()))
            .collect::<Result<Vec<_>, _>>()?;
        let groups = group_records(records);

        let short = self.config.short_wave().code();
        let long = self.config.long_wave().code();
        let matched = matched_times(&groups, short, long);

        for line in matched_summary(&matched) {
            println!("{}", line);
        }

        let pair = select_pair(&matched, short, long)?;
        println!(
            "Using: {} and {}",
            describe(&pair.t1.token),
            describe(&pair.t2.token)
        );

        Ok(pair)
    }

    fn load(&self, tag: &'static str, matched: &MatchedTime) -> Result<Scene, BtdError> {
        let short_wave = self.reader.read_grid(&matched.short_wave)?;
        let long_wave = self.reader.read_grid(&matched.long_wave)?;
        log::debug!("{} short wave: {}", tag, short_wave);
        log::debug!("{} long wave: {}", tag, long_wave);

        Ok(Scene {
            tag,
            token: matched.token.clone(),
            short_wave,
            long_wave,
        })
    }

    /// BT(long wave) - BT(short wave)
    fn btd(&self, scene: &Scene) -> Result<Grid, BtdError> {
        let label = format!(
            "BTD {}−{} µm",
            self.config.long_wave().wavelength_um(),
            self.config.short_wave().wavelength_um()
        );
        scene
            .long_wave
            .minus(&scene.short_wave, &label, BT_UNITS)
            .map_err(BtdError::from)
    }

    /// Long-wave, short-wave and BTD fields of one scene with their titles
    /// and display ranges, in rendering order.
    fn scene_fields<'a>(
        &self,
        scene: &'a Scene,
        btd: &'a Grid,
    ) -> [(&'a Grid, String, DisplayRange); 3] {
        let long = self.config.long_wave();
        let short = self.config.short_wave();
        let ranges = self.config.ranges();

        [
            (
                &scene.long_wave,
                format!(
                    "{}_{} ({}, {})",
                    long.code(),
                    scene.tag,
                    long,
                    scene.long_wave.units()
                ),
                ranges.long_wave,
            ),
            (
                &scene.short_wave,
                format!(
                    "{}_{} ({}, {})",
                    short.code(),
                    scene.tag,
                    short,
                    scene.short_wave.units()
                ),
                ranges.short_wave,
            ),
            (
                btd,
                format!(
                    "BTD_{} ({}−{} µm, {})",
                    scene.tag,
                    long.wavelength_um(),
                    short.wavelength_um(),
                    btd.units()
                ),
                ranges.btd,
            ),
        ]
    }

    fn emit_image(
        &mut self,
        grid: &Grid,
        title: &str,
        range: &DisplayRange,
    ) -> Result<PathBuf, BtdError> {
        let path = self.output_path(&format!("{}.png", file_stem(title)));
        self.sink.write_image(grid, title, range, &path)?;
        println!("{}", wrote(&path));
        Ok(path)
    }

    fn output_path(&self, name: &str) -> PathBuf {
        self.config.output_dir().join(name)
    }
}

/// Finite extent of a BTD field; NaN cells do not count.
fn report_range(tag: &str, btd: &Grid) -> String {
    match btd.finite_range() {
        Some(r) => format!("BTD {} (min/max): {} {}", tag, r.min, r.max),
        None => format!("BTD {} (min/max): n/a n/a", tag),
    }
}

/// Header plus one line per matched time, at most `SUMMARY_LIMIT` of them.
fn matched_summary(matched: &[MatchedTime]) -> Vec<String> {
    std::iter::once("Matched times (s-token):".to_string())
        .chain(matched.iter().take(SUMMARY_LIMIT).map(|m| {
            format!(
                "   {} -> {} | {}",
                m.token,
                file_name(&m.short_wave),
                file_name(&m.long_wave)
            )
        }))
        .collect()
}

fn wrote(path: &Path) -> String {
    format!("✓ wrote {}", path.display())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn describe(token: &TimeToken) -> String {
    match token.start_time() {
        Some(time) => format!("{} ({} UTC)", token, time.format("%Y-%m-%d %H:%M:%S")),
        None => token.to_string(),
    }
}
