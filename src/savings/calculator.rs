use serde::Serialize;

/// 숯 에너지 밀도 [MJ/kg]
pub const CHARCOAL_ENERGY_DENSITY_MJ_PER_KG: f64 = 29.6;
/// 바이오가스 에너지 밀도 [MJ/m³]
pub const BIOGAS_ENERGY_DENSITY_MJ_PER_M3: f64 = 20.0;
/// 월 환산 일수
pub const DAYS_PER_MONTH: f64 = 30.0;

/// 숯 단가 기본값 [통화/kg]
pub const DEFAULT_CHARCOAL_COST_PER_KG: f64 = 100.0;
/// 숯 화로 효율 기본값 (0~1)
pub const DEFAULT_EFF_CHARCOAL: f64 = 0.15;
/// 바이오가스 버너 효율 기본값 (0~1)
pub const DEFAULT_EFF_BIOGAS: f64 = 0.45;

/// 절감량 계산 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SavingsError {
    /// 숯 사용량이 음수이거나 숫자가 아님
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// 효율/단가 상수가 잘못됨
    #[error("configuration error: {0}")]
    ConfigurationError(String),
}

/// 절감량 계산 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsInput {
    /// 하루 숯 사용량 [kg/day]
    pub kg_charcoal_used: f64,
    /// 숯 단가 [통화/kg]
    pub charcoal_cost_per_kg: f64,
    /// 숯 화로 효율 (0~1]
    pub eff_charcoal: f64,
    /// 바이오가스 버너 효율 (0~1]
    pub eff_biogas: f64,
}

impl SavingsInput {
    /// 기본 상수로 입력을 만든다.
    pub fn new(kg_charcoal_used: f64) -> Self {
        Self {
            kg_charcoal_used,
            charcoal_cost_per_kg: DEFAULT_CHARCOAL_COST_PER_KG,
            eff_charcoal: DEFAULT_EFF_CHARCOAL,
            eff_biogas: DEFAULT_EFF_BIOGAS,
        }
    }

    /// 폼/CLI에서 받은 문자열을 숯 사용량으로 해석한다.
    pub fn parse(raw: &str) -> Result<Self, SavingsError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SavingsError::InvalidInput(
                "charcoal quantity is missing".into(),
            ));
        }
        let kg = trimmed.parse::<f64>().map_err(|_| {
            SavingsError::InvalidInput(format!("'{trimmed}' is not a number"))
        })?;
        Ok(Self::new(kg + 0.0))
    }

    pub fn with_charcoal_cost_per_kg(mut self, cost: f64) -> Self {
        self.charcoal_cost_per_kg = cost;
        self
    }

    pub fn with_eff_charcoal(mut self, eff: f64) -> Self {
        self.eff_charcoal = eff;
        self
    }

    pub fn with_eff_biogas(mut self, eff: f64) -> Self {
        self.eff_biogas = eff;
        self
    }

    fn validate(&self) -> Result<(), SavingsError> {
        let kg = self.kg_charcoal_used;
        if !kg.is_finite() {
            return Err(SavingsError::InvalidInput(format!(
                "charcoal quantity must be a finite number, got {kg}"
            )));
        }
        if kg < 0.0 {
            return Err(SavingsError::InvalidInput(format!(
                "charcoal quantity must not be negative, got {kg}"
            )));
        }
        for (name, eff) in [
            ("eff_charcoal", self.eff_charcoal),
            ("eff_biogas", self.eff_biogas),
        ] {
            if !eff.is_finite() || eff <= 0.0 {
                return Err(SavingsError::ConfigurationError(format!(
                    "{name} must be greater than zero, got {eff}"
                )));
            }
        }
        let cost = self.charcoal_cost_per_kg;
        if !cost.is_finite() || cost < 0.0 {
            return Err(SavingsError::ConfigurationError(format!(
                "charcoal_cost_per_kg must not be negative, got {cost}"
            )));
        }
        Ok(())
    }
}

/// 하루 기준 에너지 수지 중간값 [MJ/day].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyBalance {
    /// 사용한 숯의 총 화학 에너지
    pub energy_from_charcoal: f64,
    /// 숯 화로가 실제로 전달한 열
    pub useful_energy: f64,
    /// 같은 열을 내기 위해 바이오가스가 공급해야 하는 에너지
    pub required_biogas_energy: f64,
}

/// 절감량 계산 결과. 생성 이후 변경되지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SavingsResult {
    biogas_volume_needed: f64,
    daily_energy_savings: f64,
    daily_cost_savings: f64,
    monthly_energy_savings: f64,
    monthly_cost_savings: f64,
}

impl SavingsResult {
    /// 하루 필요 바이오가스량 [m³/day]
    pub fn biogas_volume_needed(&self) -> f64 {
        self.biogas_volume_needed
    }

    /// 하루 에너지 절감량 [MJ/day]. 음수일 수 있다.
    pub fn daily_energy_savings(&self) -> f64 {
        self.daily_energy_savings
    }

    /// 하루 비용 절감액 [통화/day]
    pub fn daily_cost_savings(&self) -> f64 {
        self.daily_cost_savings
    }

    /// 월 에너지 절감량 [MJ/month]
    pub fn monthly_energy_savings(&self) -> f64 {
        self.monthly_energy_savings
    }

    /// 월 비용 절감액 [통화/month]
    pub fn monthly_cost_savings(&self) -> f64 {
        self.monthly_cost_savings
    }
}

impl EnergyBalance {
    fn is_finite(&self) -> bool {
        [
            self.energy_from_charcoal,
            self.useful_energy,
            self.required_biogas_energy,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

impl SavingsResult {
    fn is_finite(&self) -> bool {
        [
            self.biogas_volume_needed,
            self.daily_energy_savings,
            self.daily_cost_savings,
            self.monthly_energy_savings,
            self.monthly_cost_savings,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// 검증 없이 단계별 식을 그대로 계산한다.
fn derive(input: &SavingsInput) -> (EnergyBalance, SavingsResult) {
    // -0 입력도 +0 결과가 되도록 부호를 정규화
    let kg = input.kg_charcoal_used + 0.0;
    let energy_from_charcoal = kg * CHARCOAL_ENERGY_DENSITY_MJ_PER_KG;
    let useful_energy = energy_from_charcoal * input.eff_charcoal;
    // 두 연료의 효율 차이를 보정
    let required_biogas_energy = useful_energy / input.eff_biogas;
    let biogas_volume_needed = required_biogas_energy / BIOGAS_ENERGY_DENSITY_MJ_PER_M3;
    let daily_energy_savings = energy_from_charcoal - required_biogas_energy;
    let daily_cost_savings = kg * input.charcoal_cost_per_kg;
    let balance = EnergyBalance {
        energy_from_charcoal,
        useful_energy,
        required_biogas_energy,
    };
    let result = SavingsResult {
        biogas_volume_needed,
        daily_energy_savings,
        daily_cost_savings,
        monthly_energy_savings: daily_energy_savings * DAYS_PER_MONTH,
        monthly_cost_savings: daily_cost_savings * DAYS_PER_MONTH,
    };
    (balance, result)
}

/// 입력을 검증하고 계산한 뒤, 결과가 f64 범위를 벗어나면 원인에 맞는 오류를 돌려준다.
///
/// 기본 상수로도 넘치면 사용량 탓(`InvalidInput`), 아니면 상수 탓(`ConfigurationError`).
fn checked_derive(input: &SavingsInput) -> Result<(EnergyBalance, SavingsResult), SavingsError> {
    input.validate()?;
    let (balance, result) = derive(input);
    if balance.is_finite() && result.is_finite() {
        return Ok((balance, result));
    }
    let (default_balance, default_result) = derive(&SavingsInput::new(input.kg_charcoal_used));
    if !default_balance.is_finite() || !default_result.is_finite() {
        Err(SavingsError::InvalidInput(format!(
            "charcoal quantity {} is too large to compute",
            input.kg_charcoal_used
        )))
    } else {
        Err(SavingsError::ConfigurationError(format!(
            "constants (cost {}, eff_charcoal {}, eff_biogas {}) overflow the calculation",
            input.charcoal_cost_per_kg, input.eff_charcoal, input.eff_biogas
        )))
    }
}

/// 숯 사용량에 대한 에너지 수지를 계산한다.
pub fn energy_balance(input: &SavingsInput) -> Result<EnergyBalance, SavingsError> {
    checked_derive(input).map(|(balance, _)| balance)
}

/// 숯에서 바이오가스로 전환할 때의 에너지/비용 절감량을 계산한다.
///
/// 바이오가스의 한계 비용은 0으로 본다. 바이오가스 효율이 숯보다 낮으면
/// 에너지 절감량이 음수가 되며 부호를 그대로 돌려준다.
pub fn compute_savings(input: &SavingsInput) -> Result<SavingsResult, SavingsError> {
    checked_derive(input).map(|(_, result)| result)
}

/// 문자열 입력을 해석한 뒤 기본 상수로 절감량을 계산한다.
pub fn compute_savings_from_str(raw: &str) -> Result<SavingsResult, SavingsError> {
    compute_savings(&SavingsInput::parse(raw)?)
}
