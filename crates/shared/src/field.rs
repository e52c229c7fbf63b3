use evalexpr::{build_operator_tree, ContextWithMutableVariables, HashMapContext, Value};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shape_maker::make_terrain;
use crate::util::value_from_grid;
use crate::{GeometryError, Shape};

/// Ошибки при вычислении поля
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// Ошибка парсинга формулы
    #[error("Parse error in '{expression}': {message}")]
    Parse { expression: String, message: String },
    /// Ошибка вычисления формулы
    #[error("Evaluation error at x={x}, z={z}: {message}")]
    Evaluation { x: f64, z: f64, message: String },
    /// Формула вернула не число
    #[error("Invalid type: expected number, got {0}")]
    InvalidType(String),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Скалярное поле над плоскостью xz, заданное формулой.
///
/// Доступны переменные `x`, `z` и константы `PI`, `E`.
#[derive(Debug, Clone)]
pub struct FieldExpr {
    source: String,
    tree: evalexpr::Node,
}

impl FieldExpr {
    pub fn parse(source: &str) -> Result<Self, FieldError> {
        let tree = build_operator_tree(source).map_err(|e| FieldError::Parse {
            expression: source.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            source: source.to_string(),
            tree,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Значение поля в точке (x, z)
    pub fn eval(&self, x: f64, z: f64) -> Result<f64, FieldError> {
        let to_eval_err = |e: evalexpr::EvalexprError| FieldError::Evaluation {
            x,
            z,
            message: e.to_string(),
        };

        let mut context = HashMapContext::new();
        context
            .set_value("x".to_string(), Value::Float(x))
            .map_err(to_eval_err)?;
        context
            .set_value("z".to_string(), Value::Float(z))
            .map_err(to_eval_err)?;
        context
            .set_value("PI".to_string(), Value::Float(std::f64::consts::PI))
            .ok();
        context
            .set_value("E".to_string(), Value::Float(std::f64::consts::E))
            .ok();

        match self.tree.eval_with_context(&context).map_err(to_eval_err)? {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            other => Err(FieldError::InvalidType(format!("{:?}", other))),
        }
    }

    /// Выборка поля на сетке `res × res`, покрывающей `dims = [x, z]` с
    /// центром в начале координат; индексы `[i][j]` соответствуют `x_i`, `z_j`.
    pub fn sample_grid(&self, dims: [f64; 2], res: usize) -> Result<Vec<Vec<f64>>, FieldError> {
        let x_range = (-dims[0] / 2.0, dims[0] / 2.0);
        let z_range = (-dims[1] / 2.0, dims[1] / 2.0);

        (0..res)
            .map(|i| {
                let x = value_from_grid(i, res, x_range);
                (0..res)
                    .map(|j| self.eval(x, value_from_grid(j, res, z_range)))
                    .collect::<Result<Vec<f64>, FieldError>>()
            })
            .collect()
    }
}

fn zero_field() -> String {
    "0".to_string()
}

/// Описание рельефа формулами высоты и spissitude
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainSpec {
    pub dims: [f64; 2],
    pub res: usize,
    #[serde(default = "zero_field")]
    pub height: String,
    #[serde(default = "zero_field")]
    pub spissitude: String,
}

impl TerrainSpec {
    /// Плоский рельеф
    pub fn flat(dims: [f64; 2], res: usize) -> Self {
        Self {
            dims,
            res,
            height: zero_field(),
            spissitude: zero_field(),
        }
    }

    pub fn build(&self, position: [f64; 4]) -> Result<Shape, FieldError> {
        let heights = FieldExpr::parse(&self.height)?.sample_grid(self.dims, self.res)?;
        let spiss = FieldExpr::parse(&self.spissitude)?.sample_grid(self.dims, self.res)?;
        tracing::debug!(
            res = self.res,
            height = %self.height,
            spissitude = %self.spissitude,
            "Sampled terrain fields"
        );
        Ok(make_terrain(self.dims, self.res, &heights, &spiss, position)?)
    }
}
