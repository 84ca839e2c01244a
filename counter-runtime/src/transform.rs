//! # Transform 模块
//!
//! 把滚动位置、指针偏移等输入值映射为样式值的区间变换。
//!
//! 映射是线性的，并截断到输出区间内：输入超出范围时保持在端点值。

use serde::{Deserialize, Serialize};

/// 区间映射
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeMap {
    /// 输入区间（起点，终点）
    pub input: (f64, f64),
    /// 输出区间（起点，终点）
    pub output: (f64, f64),
}

impl RangeMap {
    pub const fn new(input: (f64, f64), output: (f64, f64)) -> Self {
        Self { input, output }
    }

    /// 映射输入值
    ///
    /// 输入区间退化（起点等于终点）时返回输出起点。
    pub fn map(&self, value: f64) -> f64 {
        let (in_start, in_end) = self.input;
        let (out_start, out_end) = self.output;

        let span = in_end - in_start;
        if span == 0.0 || !span.is_finite() {
            return out_start;
        }

        let t = ((value - in_start) / span).clamp(0.0, 1.0);
        // 非有限输入（NaN）按起点处理
        let t = if t.is_nan() { 0.0 } else { t };
        out_start + (out_end - out_start) * t
    }
}

const NAVBAR_HEIGHT: RangeMap = RangeMap::new((0.0, 100.0), (80.0, 62.0));
const NAVBAR_BACKGROUND_ALPHA: RangeMap = RangeMap::new((0.0, 100.0), (0.1, 0.4));
const NAVBAR_BLUR: RangeMap = RangeMap::new((0.0, 100.0), (6.0, 12.0));
const NAVBAR_SHADOW_ALPHA: RangeMap = RangeMap::new((0.0, 100.0), (0.0, 0.15));

/// 随页面滚动收缩的导航栏样式
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NavbarStyle {
    /// 高度（px）
    pub height: f64,
    /// 背景透明度
    pub background_alpha: f64,
    /// 背景模糊半径（px）
    pub blur: f64,
    /// 阴影透明度
    pub shadow_alpha: f64,
}

impl NavbarStyle {
    /// 根据纵向滚动距离计算样式
    pub fn at_scroll(scroll_y: f64) -> Self {
        Self {
            height: NAVBAR_HEIGHT.map(scroll_y),
            background_alpha: NAVBAR_BACKGROUND_ALPHA.map(scroll_y),
            blur: NAVBAR_BLUR.map(scroll_y),
            shadow_alpha: NAVBAR_SHADOW_ALPHA.map(scroll_y),
        }
    }
}

const HERO_ROTATE_X: RangeMap = RangeMap::new((-200.0, 200.0), (10.0, -10.0));
const HERO_ROTATE_Y: RangeMap = RangeMap::new((-200.0, 200.0), (-10.0, 10.0));

/// 首屏卡片随指针倾斜的角度（度）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct HeroTilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl HeroTilt {
    /// 根据指针相对视口中心的偏移计算
    pub fn from_pointer(offset_x: f64, offset_y: f64) -> Self {
        Self {
            rotate_x: HERO_ROTATE_X.map(offset_y),
            rotate_y: HERO_ROTATE_Y.map(offset_x),
        }
    }

    /// 根据指针绝对坐标与视口尺寸计算
    pub fn from_viewport(pointer: (f64, f64), viewport: (f64, f64)) -> Self {
        Self::from_pointer(pointer.0 - viewport.0 / 2.0, pointer.1 - viewport.1 / 2.0)
    }
}
