//! 图示绘制 - 业务能力层
//!
//! 绘制球体装箱题的俯视图：2 行 4 列的圆 + 一行说明文字

use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut, draw_text_mut};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, RenderError};

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 300;

const SPHERE_RADIUS_PX: i32 = 40;
const PADDING_PX: i32 = 20;
const GRID_ROWS: i32 = 2;
const GRID_COLS: i32 = 4;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const SPHERE_FILL: Rgb<u8> = Rgb([173, 216, 230]);
const OUTLINE: Rgb<u8> = Rgb([0, 0, 0]);

const CAPTION: &str = "Top view: 2 rows × 4 columns of spheres";
const CAPTION_POS: (i32, i32) = (20, 250);
const CAPTION_SIZE: f32 = 18.0;

/// 配置字体不可用时依次尝试的系统字体
const SYSTEM_FONT_PATHS: [&str; 4] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// 图示绘制服务
pub struct DiagramRenderer {
    font_path: PathBuf,
}

impl DiagramRenderer {
    pub fn new(config: &Config) -> Self {
        Self {
            font_path: config.font_path.clone(),
        }
    }

    /// 绘制图示并保存为 PNG
    ///
    /// # 参数
    /// - `output_path`: 图片保存路径
    ///
    /// # 返回
    /// 返回保存后的路径
    pub fn render(&self, output_path: &Path) -> AppResult<PathBuf> {
        let font = self.load_font();
        let img = draw_packed_spheres(font.as_ref());

        img.save(output_path)
            .map_err(|e| AppError::render_save_failed(output_path.display().to_string(), e))?;

        info!("🖼 图示已保存: {}", output_path.display());
        Ok(output_path.to_path_buf())
    }

    /// 加载说明文字字体，全部失败时返回 None（不画说明文字）
    fn load_font(&self) -> Option<FontVec> {
        let candidates = std::iter::once(self.font_path.clone())
            .chain(SYSTEM_FONT_PATHS.iter().map(PathBuf::from));

        for path in candidates {
            match load_font_file(&path) {
                Ok(font) => {
                    debug!("使用字体: {}", path.display());
                    return Some(font);
                }
                Err(e) => debug!("字体不可用: {}", e),
            }
        }

        warn!("⚠ 没有可用的字体，图示将不包含说明文字");
        None
    }
}

fn load_font_file(path: &Path) -> AppResult<FontVec> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    FontVec::try_from_vec(bytes).map_err(|e| {
        RenderError::FontParseFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        }
        .into()
    })
}

/// 圆心坐标（按行优先顺序）
pub fn sphere_centers() -> Vec<(i32, i32)> {
    let step = SPHERE_RADIUS_PX * 2 + PADDING_PX;
    let mut centers = Vec::with_capacity((GRID_ROWS * GRID_COLS) as usize);

    for row in 0..GRID_ROWS {
        for col in 0..GRID_COLS {
            let cx = PADDING_PX + col * step + SPHERE_RADIUS_PX;
            let cy = PADDING_PX + row * step + SPHERE_RADIUS_PX;
            centers.push((cx, cy));
        }
    }

    centers
}

/// 在白色画布上绘制球体俯视图
///
/// `font` 为 None 时省略说明文字
pub fn draw_packed_spheres(font: Option<&FontVec>) -> RgbImage {
    let mut img = RgbImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND);

    for center in sphere_centers() {
        draw_filled_circle_mut(&mut img, center, SPHERE_RADIUS_PX, SPHERE_FILL);
        draw_hollow_circle_mut(&mut img, center, SPHERE_RADIUS_PX, OUTLINE);
    }

    if let Some(font) = font {
        draw_text_mut(
            &mut img,
            OUTLINE,
            CAPTION_POS.0,
            CAPTION_POS.1,
            PxScale::from(CAPTION_SIZE),
            font,
            CAPTION,
        );
    }

    img
}
