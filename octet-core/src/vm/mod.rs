//! 取指-译码-执行循环
//!
//! 循环本身从不推进 `ip`：每条指令的长度由对应的处理器决定。
//! 处理器校验失败时 `ip` 不变，下一步会重新取到同一条指令（停滞）。
//! 默认情况下这会无限循环，与被解释程序的语义一致；`max_steps`
//! 与 `StallPolicy::Halt` 是可选的安全阀，默认关闭。

mod handlers;

use crate::error::{Halt, VmError};
use crate::memory::Memory;
use crate::opcode::{Opcode, OpcodeDecoder};
use handlers::Flow;
use octet_config::{LimitConfig, StallPolicy, VmConfig};
use std::io::Write;
use tracing::{debug, info, instrument, trace};

/// 解释器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Halted(Halt),
}

/// 单步执行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Halted(Halt),
}

/// 解释器：独占一块执行内存和一个指令指针
pub struct Interpreter<W: Write> {
    memory: Memory,
    ip: usize,
    steps: u64,
    state: State,
    decoder: OpcodeDecoder,
    limits: LimitConfig,
    stall: StallPolicy,
    output: W,
}

impl<W: Write> Interpreter<W> {
    /// 使用默认操作码表创建解释器，`ip = 0`
    pub fn new(program: impl Into<Memory>, output: W) -> Self {
        Self {
            memory: program.into(),
            ip: 0,
            steps: 0,
            state: State::Running,
            decoder: OpcodeDecoder::default(),
            limits: LimitConfig::default(),
            stall: StallPolicy::default(),
            output,
        }
    }

    /// 使用指定配置创建解释器；操作码表无效时报错
    pub fn with_config(
        program: impl Into<Memory>,
        output: W,
        config: &VmConfig,
    ) -> Result<Self, VmError> {
        let decoder = OpcodeDecoder::new(&config.opcodes)?;
        Ok(Self {
            decoder,
            limits: config.limits.clone(),
            stall: config.stall,
            ..Self::new(program, output)
        })
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// 已执行的处理器调用次数（END 与停机检查不计入）
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// 拆出内存、最终 `ip` 和输出目标
    pub fn into_parts(self) -> (Memory, usize, W) {
        (self.memory, self.ip, self.output)
    }

    /// 执行一次取指-译码-执行
    ///
    /// 停机后再调用只会返回同一个停机原因，不产生任何效果。
    pub fn step(&mut self) -> Result<Step, VmError> {
        if let State::Halted(halt) = self.state {
            return Ok(Step::Halted(halt));
        }

        if let Some(max_steps) = self.limits.max_steps {
            if self.steps >= max_steps {
                return Ok(self.halt(Halt::StepLimit { steps: self.steps }));
            }
        }

        let ip = self.ip;
        let Some(tag) = self.memory.get(ip) else {
            return Ok(self.halt(Halt::OutOfBounds { ip }));
        };
        let Some(opcode) = self.decoder.decode(tag) else {
            debug!(target: "octet::vm", opcode = tag, offset = ip, "unknown opcode");
            return Ok(self.halt(Halt::UnknownOpcode { opcode: tag, offset: ip }));
        };

        trace!(target: "octet::vm", ip, op = opcode.name(), "execute");

        let flow = match opcode {
            Opcode::End => return Ok(self.halt(Halt::End { offset: ip })),
            Opcode::Jmp => handlers::jmp(&self.memory, ip),
            Opcode::Swp => handlers::swp(&mut self.memory, ip),
            Opcode::Add => handlers::add(&mut self.memory, ip),
            Opcode::Xor => handlers::xor(&mut self.memory, ip),
            Opcode::Invert => handlers::invert(&mut self.memory, ip),
            Opcode::Print => handlers::print(&self.memory, ip, &mut self.output)
                .map_err(|source| VmError::Output { offset: ip, source })?,
        };
        self.steps += 1;

        match flow {
            Flow::Next(next) => self.ip = next,
            Flow::Stall => {
                debug!(target: "octet::vm", ip, op = opcode.name(), "operand validation failed, ip not advanced");
                if self.stall == StallPolicy::Halt {
                    return Ok(self.halt(Halt::Stalled { opcode, offset: ip }));
                }
            }
        }
        Ok(Step::Continue)
    }

    /// 一直执行到停机
    #[instrument(target = "octet::vm", skip(self), fields(len = self.memory.len()))]
    pub fn run(&mut self) -> Result<Halt, VmError> {
        info!(target: "octet::vm", "Starting execution");
        loop {
            if let Step::Halted(halt) = self.step()? {
                info!(target: "octet::vm", steps = self.steps, ip = self.ip, %halt, "Execution halted");
                return Ok(halt);
            }
        }
    }

    fn halt(&mut self, halt: Halt) -> Step {
        self.state = State::Halted(halt);
        Step::Halted(halt)
    }
}

impl<W: Write> std::fmt::Debug for Interpreter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("ip", &self.ip)
            .field("steps", &self.steps)
            .field("state", &self.state)
            .field("memory", &self.memory)
            .finish()
    }
}
