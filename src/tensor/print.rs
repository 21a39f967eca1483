use crate::tensor::Tensor;
use std::fmt;

impl Tensor {
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let shape = self.shape();
        match shape.len() {
            0 => write!(f, "{:8.4}", self.number().unwrap_or(f32::NAN))?,
            1 => write_row(f, &self.data_as_vec())?,
            2 => {
                let values = self.data_as_vec();
                let cols = shape[1].max(1);
                write!(f, "[")?;
                for (i, row) in values.chunks(cols).enumerate() {
                    if i > 0 {
                        write!(f, ",\n ")?;
                    }
                    write_row(f, row)?;
                }
                write!(f, "]")?;
            }
            _ => {
                return writeln!(
                    f,
                    "<对于阶数大于二（rank>2）的张量（形状：{shape:?}）无法展示具体数据>"
                );
            }
        }
        writeln!(f, "\n形状: {shape:?}")
    }
}

fn write_row(f: &mut fmt::Formatter, row: &[f32]) -> fmt::Result {
    write!(f, "[")?;
    for (i, x) in row.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{x:8.4}")?;
    }
    write!(f, "]")
}
