use rand::Rng;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

pub type Float = f64;

/// Components below this magnitude count as zero for `near_zero`,
/// which guards against degenerate scatter directions.
const NEAR_ZERO_EPS: Float = 1e-8;

/// x: red, right
///
/// y: green, up
///
/// z: blue, forward
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Vec3 {
    pub x: Float,
    pub y: Float,
    pub z: Float,
}

pub type Color = Vec3;
pub type Point3 = Vec3;

impl Vec3 {
    pub fn new(x: Float, y: Float, z: Float) -> Self {
        Vec3 { x, y, z }
    }

    pub fn zero() -> Self {
        Vec3::new(0.0, 0.0, 0.0)
    }

    pub fn one() -> Self {
        Vec3::new(1.0, 1.0, 1.0)
    }

    pub fn dot(&self, other: &Self) -> Float {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }

    pub fn length_squared(&self) -> Float {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Callers must not pass the zero vector; the result is NaN components,
    /// the same contract as dividing by a zero length anywhere else.
    pub fn normalized(&self) -> Self {
        *self / self.length()
    }

    pub fn near_zero(&self) -> bool {
        self.x.abs() < NEAR_ZERO_EPS
            && self.y.abs() < NEAR_ZERO_EPS
            && self.z.abs() < NEAR_ZERO_EPS
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R, min: Float, max: Float) -> Self {
        Vec3 {
            x: rng.gen_range(min..max),
            y: rng.gen_range(min..max),
            z: rng.gen_range(min..max),
        }
    }

    /// Rejection-samples a point strictly inside the unit ball.
    /// Acceptance is ~52%, so the loop terminates after ~2 tries on average.
    pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let v = Vec3::random(rng, -1.0, 1.0);
            if v.length_squared() < 1.0 {
                return v;
            }
        }
    }

    pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Vec3::random_in_unit_sphere(rng).normalized()
    }

    /// Rejection-samples a point in the x-y unit disc (z = 0).
    pub fn random_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let v = Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 0.0);
            if v.length_squared() < 1.0 {
                return v;
            }
        }
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Mul<Float> for Vec3 {
    type Output = Self;

    fn mul(self, scalar: Float) -> Self::Output {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

/// Componentwise product, used for attenuation at scatter events.
impl Mul for Vec3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x * rhs.x,
            y: self.y * rhs.y,
            z: self.z * rhs.z,
        }
    }
}

impl Div<Float> for Vec3 {
    type Output = Self;

    fn div(self, scalar: Float) -> Self::Output {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl MulAssign<Float> for Vec3 {
    fn mul_assign(&mut self, scalar: Float) {
        self.x *= scalar;
        self.y *= scalar;
        self.z *= scalar;
    }
}

impl DivAssign<Float> for Vec3 {
    fn div_assign(&mut self, scalar: Float) {
        self.x /= scalar;
        self.y /= scalar;
        self.z /= scalar;
    }
}

impl Sum for Vec3 {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Vec3::zero(), Add::add)
    }
}
