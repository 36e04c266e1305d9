use crate::backends::{
    common::Backend,
    cpu::{context::CpuContext, error::CpuError},
};

#[derive(Debug, Clone)]
pub struct Cpu;

impl Backend for Cpu {
    type Context = CpuContext;
    type Error = CpuError;
}
