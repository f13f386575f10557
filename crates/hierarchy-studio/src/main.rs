use anyhow::Result;

use hierarchy_engine::device::GpuInit;
use hierarchy_engine::logging::{init_logging, LoggingConfig};
use hierarchy_engine::text::{FontId, FontSystem};
use hierarchy_engine::window::Runtime;
use hierarchy_studio::{Panel, PanelConfig};

const FONT_PATHS: [&str; 5] = [
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = PanelConfig::default();
    let mut fonts = FontSystem::new();
    let font = load_font(&mut fonts);

    log::info!("starting {}", config.title);
    let runtime = config.runtime_config();
    Runtime::run(runtime, GpuInit::default(), Panel::new(config, fonts, font))
}

fn load_font(fonts: &mut FontSystem) -> Option<FontId> {
    let Some((path, bytes)) = FONT_PATHS
        .iter()
        .find_map(|p| std::fs::read(p).ok().map(|b| (*p, b)))
    else {
        log::warn!("no system font found; checkbox label disabled");
        return None;
    };

    match fonts.load_font(&bytes) {
        Ok(id) => {
            log::debug!("loaded font {path}");
            Some(id)
        }
        Err(e) => {
            log::warn!("{path}: {e}; checkbox label disabled");
            None
        }
    }
}
