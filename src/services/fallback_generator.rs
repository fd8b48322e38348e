//! 兜底题目生成 - 业务能力层
//!
//! 没有 API 密钥（或 LLM 调用失败）时，用固定模板 + 随机参数生成两道题：
//! 1. 组合计数：背包颜色 × 水瓶类型
//! 2. 几何：按 2 行 4 列紧密排列的球体求盒子尺寸

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const BACKPACK_COLORS: [&str; 5] = ["Blue", "Green", "Gray", "Red", "Yellow"];
const BOTTLE_TYPES: [&str; 5] = ["Stainless", "Plastic", "Glass", "Insulated", "Copper"];
const SPHERE_RADII: [i64; 3] = [2, 3, 4];

const BACKPACK_SAMPLE: usize = 3;
const BOTTLE_SAMPLE: usize = 4;

/// 球体排列：行数 × 列数
pub const SPHERE_ROWS: i64 = 2;
pub const SPHERE_COLS: i64 = 4;

/// 组合计数题的参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GearChoices {
    pub backpack_colors: Vec<&'static str>,
    pub bottle_types: Vec<&'static str>,
}

impl GearChoices {
    pub fn total_combinations(&self) -> i64 {
        (self.backpack_colors.len() * self.bottle_types.len()) as i64
    }
}

/// 球体装箱题的尺寸（单位：厘米）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxDimensions {
    pub radius: i64,
    pub diameter: i64,
    pub height: i64,
    pub width: i64,
    pub length: i64,
}

impl BoxDimensions {
    pub fn from_radius(radius: i64) -> Self {
        let diameter = radius * 2;
        Self {
            radius,
            diameter,
            height: diameter,
            width: SPHERE_COLS * diameter,
            length: SPHERE_COLS * diameter * 3,
        }
    }
}

/// 兜底题目生成器
pub struct FallbackGenerator {
    rng: StdRng,
}

impl FallbackGenerator {
    /// 创建生成器
    ///
    /// # 参数
    /// - `seed`: 随机种子，None 时使用系统熵
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// 生成两道题目（组合计数题，几何题）
    pub fn generate(&mut self) -> (String, String) {
        let choices = self.sample_gear_choices();
        let dims = self.sample_box_dimensions();
        (
            combinatorics_question(&choices),
            packed_spheres_question(&dims),
        )
    }

    /// 从候选列表中各抽取不重复的背包颜色和水瓶类型
    pub fn sample_gear_choices(&mut self) -> GearChoices {
        GearChoices {
            backpack_colors: BACKPACK_COLORS
                .choose_multiple(&mut self.rng, BACKPACK_SAMPLE)
                .copied()
                .collect(),
            bottle_types: BOTTLE_TYPES
                .choose_multiple(&mut self.rng, BOTTLE_SAMPLE)
                .copied()
                .collect(),
        }
    }

    pub fn sample_box_dimensions(&mut self) -> BoxDimensions {
        let radius = SPHERE_RADII.choose(&mut self.rng).copied().unwrap_or(SPHERE_RADII[0]);
        BoxDimensions::from_radius(radius)
    }
}

/// 组合计数题
pub fn combinatorics_question(choices: &GearChoices) -> String {
    let num_backpacks = choices.backpack_colors.len();
    let num_bottles = choices.bottle_types.len();
    let total = choices.total_combinations();

    format!(
        r#"@title Combinatorics — Campus Gear Choices
@description Count combinations of independent choices (backpack × bottle).

@question At Greenfield High each student selects **one backpack** and **one water bottle**.
The backpack colors available are {colors}.
The water bottle types available are {bottles}.
How many different backpack–bottle combinations are possible?

@instruction Select the single best answer.
@difficulty easy
@Order 1

@option {o1}
@option {o2}
@option {o3}
@option {o4}
@@option {total}
@explanation Each combination is formed by choosing one backpack ({num_backpacks} choices)
and one bottle ({num_bottles} choices). Total combinations = {num_backpacks}×{num_bottles}={total}.

@subject Quantitative Math
@unit Data Analysis & Probability
@topic Counting & Arrangement Problems
@plusmarks 1"#,
        colors = choices.backpack_colors.join(", "),
        bottles = choices.bottle_types.join(", "),
        o1 = total - 5,
        o2 = total - 3,
        o3 = total - 1,
        o4 = total + 2,
    )
}

/// 球体装箱几何题
pub fn packed_spheres_question(dims: &BoxDimensions) -> String {
    let BoxDimensions {
        radius,
        diameter,
        height,
        width,
        length,
    } = *dims;
    let rows = SPHERE_ROWS;
    let cols = SPHERE_COLS;

    format!(
        r#"@title Packed Spheres — Box Dimensions
@description Determine the dimensions of a rectangular box tightly packed with identical spheres arranged in a rectangular grid (top view).

@question A rectangular box contains {count} identical spheres arranged in {rows} rows and {cols} columns (each sphere touches its neighbors). Each sphere has radius \({radius}\) centimeters. Which of the following is closest to the internal dimensions (in centimeters) of the rectangular box (height × width × length)?

@instruction Choose the option that lists the box dimensions in centimeters.
@difficulty moderate
@Order 2

@option \({height} \times {width} \times {l_minus_5}\)
@option \({h_plus_2} \times {width} \times {length}\)
@@option \({height} \times {width} \times {length}\)
@option \({h_plus_4} \times {w_plus_6} \times {l_plus_12}\)
@option \({h_plus_3} \times {width} \times {l_plus_6}\)
@explanation Each sphere has diameter \(d=2r=2\times{radius}={diameter}\) cm. For a {rows}-by-{cols} tight grid: Height={height} cm, Width={width} cm, Length={length} cm. So dimensions = \({height} \times {width} \times {length}\).

@subject Quantitative Math
@unit Geometry and Measurement
@topic Solid Figures (Volume of Cubes)
@plusmarks 1"#,
        count = rows * cols,
        l_minus_5 = length - 5,
        h_plus_2 = height + 2,
        h_plus_3 = height + 3,
        h_plus_4 = height + 4,
        w_plus_6 = width + 6,
        l_plus_6 = length + 6,
        l_plus_12 = length + 12,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaggedQuestion;

    #[test]
    fn test_gear_choices_are_distinct_samples() {
        let mut generator = FallbackGenerator::new(Some(7));

        for _ in 0..50 {
            let choices = generator.sample_gear_choices();
            assert_eq!(choices.backpack_colors.len(), 3);
            assert_eq!(choices.bottle_types.len(), 4);

            let mut colors = choices.backpack_colors.clone();
            colors.sort();
            colors.dedup();
            assert_eq!(colors.len(), 3, "背包颜色不应重复");

            let mut bottles = choices.bottle_types.clone();
            bottles.sort();
            bottles.dedup();
            assert_eq!(bottles.len(), 4, "水瓶类型不应重复");

            assert!(choices.backpack_colors.iter().all(|c| BACKPACK_COLORS.contains(c)));
            assert!(choices.bottle_types.iter().all(|b| BOTTLE_TYPES.contains(b)));
            assert_eq!(choices.total_combinations(), 12);
        }
    }

    #[test]
    fn test_box_dimensions_from_radius() {
        let dims = BoxDimensions::from_radius(3);
        assert_eq!(dims.diameter, 6);
        assert_eq!(dims.height, 6);
        assert_eq!(dims.width, 24);
        assert_eq!(dims.length, 72);
    }

    #[test]
    fn test_radius_comes_from_allowed_set() {
        let mut generator = FallbackGenerator::new(Some(42));
        for _ in 0..50 {
            let dims = generator.sample_box_dimensions();
            assert!(SPHERE_RADII.contains(&dims.radius));
        }
    }

    #[test]
    fn test_combinatorics_question_text() {
        let choices = GearChoices {
            backpack_colors: vec!["Blue", "Red", "Gray"],
            bottle_types: vec!["Glass", "Copper", "Plastic", "Stainless"],
        };
        let text = combinatorics_question(&choices);

        assert!(text.starts_with("@title Combinatorics — Campus Gear Choices\n"));
        assert!(text.contains("The backpack colors available are Blue, Red, Gray."));
        assert!(text.contains("The water bottle types available are Glass, Copper, Plastic, Stainless."));
        assert!(text.contains("Total combinations = 3×4=12."));
        assert!(text.ends_with("@plusmarks 1"));

        let q = TaggedQuestion::parse(&text).unwrap();
        let options: Vec<&str> = q.options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(options, vec!["7", "9", "11", "14", "12"]);
        assert_eq!(q.correct_option().map(|o| o.text.as_str()), Some("12"));
        assert_eq!(q.order, Some(1));
        assert_eq!(q.difficulty, "easy");
        assert_eq!(q.topic, "Counting & Arrangement Problems");
        assert!(q.validate().is_ok());
    }

    #[test]
    fn test_packed_spheres_question_text() {
        let text = packed_spheres_question(&BoxDimensions::from_radius(2));

        assert!(text.contains("contains 8 identical spheres arranged in 2 rows and 4 columns"));
        assert!(text.contains(r"Each sphere has radius \(2\) centimeters."));
        assert!(text.contains(r"\(d=2r=2\times2=4\) cm"));
        assert!(text.contains("Height=4 cm, Width=16 cm, Length=48 cm."));

        let q = TaggedQuestion::parse(&text).unwrap();
        let options: Vec<&str> = q.options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(
            options,
            vec![
                r"\(4 \times 16 \times 43\)",
                r"\(6 \times 16 \times 48\)",
                r"\(4 \times 16 \times 48\)",
                r"\(8 \times 22 \times 60\)",
                r"\(7 \times 16 \times 54\)",
            ]
        );
        assert_eq!(
            q.correct_option().map(|o| o.text.as_str()),
            Some(r"\(4 \times 16 \times 48\)")
        );
        assert_eq!(q.order, Some(2));
        assert_eq!(q.unit, "Geometry and Measurement");
        assert!(q.validate().is_ok());
    }

    #[test]
    fn test_correct_answer_matches_explanation() {
        let mut generator = FallbackGenerator::new(None);
        for _ in 0..20 {
            let (first, second) = generator.generate();
            for text in [first, second] {
                let q = TaggedQuestion::parse(&text).unwrap();
                assert!(q.validate().is_ok());
                let correct = &q.correct_option().unwrap().text;
                assert!(
                    q.explanation.ends_with(&format!("{}.", correct)),
                    "解析 {:?} 应以正确答案 {:?} 结尾",
                    q.explanation,
                    correct
                );
            }
        }
    }

    #[test]
    fn test_same_seed_same_questions() {
        let a = FallbackGenerator::new(Some(2024)).generate();
        let b = FallbackGenerator::new(Some(2024)).generate();
        assert_eq!(a, b);
    }
}
