/// Transform commands and the line-based command script format
use std::str::FromStr;

use nalgebra::Vector3;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{multispace0, multispace1},
    combinator::{all_consuming, value},
    number::complete::float,
    sequence::delimited,
    IResult,
};

/// Distance moved by one step, in model units
pub const MOVE_STEP: f32 = 0.1;
/// Angle turned by one step, in radians
pub const ROTATE_STEP: f32 = 0.1;
pub const SCALE_UP_FACTOR: f32 = 1.2;
pub const SCALE_DOWN_FACTOR: f32 = 0.8;

/// A single mutation of the solid
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Translate(Vector3<f32>),
    Rotate(Vector3<f32>),
    Scale(Vector3<f32>),
    Reset,
}

/// The fixed-size steps a user can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    MoveForward,
    MoveBackward,
    RotatePlusX,
    RotateMinusX,
    RotatePlusY,
    RotateMinusY,
    RotatePlusZ,
    RotateMinusZ,
    ScaleUp,
    ScaleDown,
    Reset,
}

impl Action {
    pub fn command(self) -> Command {
        let step = MOVE_STEP;
        let turn = ROTATE_STEP;
        match self {
            // Screen y grows downwards, so "up" is negative y
            Self::MoveUp => Command::Translate(Vector3::new(0.0, -step, 0.0)),
            Self::MoveDown => Command::Translate(Vector3::new(0.0, step, 0.0)),
            Self::MoveLeft => Command::Translate(Vector3::new(-step, 0.0, 0.0)),
            Self::MoveRight => Command::Translate(Vector3::new(step, 0.0, 0.0)),
            Self::MoveForward => Command::Translate(Vector3::new(0.0, 0.0, -step)),
            Self::MoveBackward => Command::Translate(Vector3::new(0.0, 0.0, step)),
            Self::RotatePlusX => Command::Rotate(Vector3::new(turn, 0.0, 0.0)),
            Self::RotateMinusX => Command::Rotate(Vector3::new(-turn, 0.0, 0.0)),
            Self::RotatePlusY => Command::Rotate(Vector3::new(0.0, turn, 0.0)),
            Self::RotateMinusY => Command::Rotate(Vector3::new(0.0, -turn, 0.0)),
            Self::RotatePlusZ => Command::Rotate(Vector3::new(0.0, 0.0, turn)),
            Self::RotateMinusZ => Command::Rotate(Vector3::new(0.0, 0.0, -turn)),
            Self::ScaleUp => Command::Scale(Vector3::repeat(SCALE_UP_FACTOR)),
            Self::ScaleDown => Command::Scale(Vector3::repeat(SCALE_DOWN_FACTOR)),
            Self::Reset => Command::Reset,
        }
    }
}

impl From<Action> for Command {
    fn from(action: Action) -> Self {
        action.command()
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        match all_consuming(delimited(multispace0, parse_command, multispace0))(line) {
            Ok((_, command)) => Ok(command),
            Err(e) => Err(format!("Failed to parse command {line:?}: {e:?}")),
        }
    }
}

/// Parse a command script.
///
/// One command per line. Anything after `#` is a comment; blank lines are
/// skipped. The error names the first line that does not parse.
pub fn parse_script(input: &str) -> Result<Vec<Command>, String> {
    let mut commands = Vec::new();

    for (number, line) in input.lines().enumerate() {
        let line = match line.find('#') {
            Some(comment) => &line[..comment],
            None => line,
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = line
            .parse::<Command>()
            .map_err(|e| format!("line {}: {}", number + 1, e))?;
        commands.push(command);
    }

    Ok(commands)
}

fn parse_command(input: &str) -> IResult<&str, Command> {
    alt((parse_vector_command, parse_action))(input)
}

fn parse_vector_command(input: &str) -> IResult<&str, Command> {
    let (input, keyword) = alt((tag("translate"), tag("rotate"), tag("scale")))(input)?;
    let (input, (x, y, z)) = parse_vector3(input)?;
    let vector = Vector3::new(x, y, z);

    let command = match keyword {
        "translate" => Command::Translate(vector),
        "rotate" => Command::Rotate(vector),
        _ => Command::Scale(vector),
    };
    Ok((input, command))
}

fn parse_action(input: &str) -> IResult<&str, Command> {
    let (input, action) = alt((
        value(Action::MoveUp, tag("move-up")),
        value(Action::MoveDown, tag("move-down")),
        value(Action::MoveLeft, tag("move-left")),
        value(Action::MoveRight, tag("move-right")),
        value(Action::MoveForward, tag("move-forward")),
        value(Action::MoveBackward, tag("move-backward")),
        value(Action::RotatePlusX, tag("rotate+x")),
        value(Action::RotateMinusX, tag("rotate-x")),
        value(Action::RotatePlusY, tag("rotate+y")),
        value(Action::RotateMinusY, tag("rotate-y")),
        value(Action::RotatePlusZ, tag("rotate+z")),
        value(Action::RotateMinusZ, tag("rotate-z")),
        value(Action::ScaleUp, tag("scale-up")),
        value(Action::ScaleDown, tag("scale-down")),
        value(Action::Reset, tag("reset")),
    ))(input)?;
    Ok((input, action.command()))
}

fn parse_vector3(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, _) = multispace1(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, (x, y, z)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_magnitudes() {
        assert_eq!(
            Action::MoveUp.command(),
            Command::Translate(Vector3::new(0.0, -0.1, 0.0))
        );
        assert_eq!(
            Action::MoveBackward.command(),
            Command::Translate(Vector3::new(0.0, 0.0, 0.1))
        );
        assert_eq!(
            Action::RotateMinusY.command(),
            Command::Rotate(Vector3::new(0.0, -0.1, 0.0))
        );
        assert_eq!(
            Action::ScaleUp.command(),
            Command::Scale(Vector3::new(1.2, 1.2, 1.2))
        );
        assert_eq!(
            Action::ScaleDown.command(),
            Command::Scale(Vector3::new(0.8, 0.8, 0.8))
        );
        assert_eq!(Command::from(Action::Reset), Command::Reset);
    }

    #[test]
    fn test_parse_vector_commands() {
        assert_eq!(
            "translate 1 -2.5 0".parse::<Command>(),
            Ok(Command::Translate(Vector3::new(1.0, -2.5, 0.0)))
        );
        assert_eq!(
            "  rotate 0.5 0 -1e-1 ".parse::<Command>(),
            Ok(Command::Rotate(Vector3::new(0.5, 0.0, -0.1)))
        );
        assert_eq!(
            "scale 2 2 0".parse::<Command>(),
            Ok(Command::Scale(Vector3::new(2.0, 2.0, 0.0)))
        );
    }

    #[test]
    fn test_parse_named_actions() {
        assert_eq!("reset".parse::<Command>(), Ok(Command::Reset));
        assert_eq!("rotate+x".parse::<Command>(), Ok(Action::RotatePlusX.command()));
        assert_eq!("rotate-z".parse::<Command>(), Ok(Action::RotateMinusZ.command()));
        assert_eq!("scale-down".parse::<Command>(), Ok(Action::ScaleDown.command()));
        assert_eq!("move-forward".parse::<Command>(), Ok(Action::MoveForward.command()));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("translate 1 2".parse::<Command>().is_err());
        assert!("rotate 1 2 3 4".parse::<Command>().is_err());
        assert!("resets".parse::<Command>().is_err());
        assert!("spin 1 2 3".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_script() {
        let script = "# tilt and shrink\n\nrotate+x\nrotate 0 0.2 0  # yaw\n   \nscale-down\nreset\n";
        let commands = parse_script(script).unwrap();
        assert_eq!(
            commands,
            vec![
                Action::RotatePlusX.command(),
                Command::Rotate(Vector3::new(0.0, 0.2, 0.0)),
                Action::ScaleDown.command(),
                Command::Reset,
            ]
        );
    }

    #[test]
    fn test_parse_script_reports_line() {
        let error = parse_script("reset\nmove-up\nfly away\n").unwrap_err();
        assert!(error.starts_with("line 3:"), "{error}");
    }
}
