use crate::cards::notation::Class;
use crate::cards::rank::Rank;

/// expand compact range notation into hand classes.
///
/// the grammar is the one every chart is written in:
///   "TT"        one pair class
///   "TT+"       that pair and every better pair
///   "99-66"     a descending run of pairs
///   "AQs"       one suited or offsuit class
///   "A2s+"      fixed high card, low card and up
///   "KTo-K8o"   fixed high card, descending run
///   "T9s-65s"   constant-gap run stepping both ranks down
/// tokens are whitespace separated and unioned.
pub fn parse(s: &str) -> anyhow::Result<Vec<Class>> {
    let mut classes = Vec::new();
    for token in s.split_whitespace() {
        expand(token, &mut classes)?;
    }
    classes.sort_unstable();
    classes.dedup();
    Ok(classes)
}

fn expand(token: &str, out: &mut Vec<Class>) -> anyhow::Result<()> {
    if let Some(stripped) = token.strip_suffix('+') {
        let class = Class::try_from(stripped)?;
        if class.paired() {
            // every pair from here up
            for r in u8::from(class.hi())..=u8::from(Rank::Ace) {
                out.push(Class::pair(Rank::from(r)));
            }
        } else {
            // fixed high card, low card walks up to just under it
            for r in u8::from(class.lo())..u8::from(class.hi()) {
                out.push(sibling(class, class.hi(), Rank::from(r)));
            }
        }
        return Ok(());
    }
    if let Some((x, y)) = token.split_once('-') {
        let x = Class::try_from(x)?;
        let y = Class::try_from(y)?;
        anyhow::ensure!(
            x.paired() == y.paired() && x.suited() == y.suited(),
            "range ends must share shape: {}",
            token
        );
        // either end may come first
        let (a, b) = if x.hi() >= y.hi() && x.lo() >= y.lo() {
            (x, y)
        } else {
            (y, x)
        };
        if a.paired() {
            for r in u8::from(b.hi())..=u8::from(a.hi()) {
                out.push(Class::pair(Rank::from(r)));
            }
        } else if a.hi() == b.hi() {
            anyhow::ensure!(a.lo() >= b.lo(), "malformed range: {}", token);
            for r in u8::from(b.lo())..=u8::from(a.lo()) {
                out.push(sibling(a, a.hi(), Rank::from(r)));
            }
        } else {
            // constant-gap run, e.g. T9s-65s
            let gap_a = u8::from(a.hi()) - u8::from(a.lo());
            let gap_b = u8::from(b.hi()) - u8::from(b.lo());
            anyhow::ensure!(gap_a == gap_b, "run must keep its gap: {}", token);
            for hi in u8::from(b.hi())..=u8::from(a.hi()) {
                out.push(sibling(a, Rank::from(hi), Rank::from(hi - gap_a)));
            }
        }
        return Ok(());
    }
    out.push(Class::try_from(token)?);
    Ok(())
}

fn sibling(like: Class, hi: Rank, lo: Rank) -> Class {
    if like.suited() {
        Class::suit(hi, lo)
    } else {
        Class::off(hi, lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has(classes: &[Class], s: &str) -> bool {
        classes.contains(&Class::try_from(s).unwrap())
    }

    #[test]
    fn pairs_plus() {
        let r = parse("TT+").unwrap();
        assert_eq!(r.len(), 5);
        assert!(has(&r, "AA") && has(&r, "TT") && !has(&r, "99"));
    }

    #[test]
    fn pair_runs() {
        let r = parse("99-66").unwrap();
        assert_eq!(r.len(), 4);
        assert!(has(&r, "77") && !has(&r, "55") && !has(&r, "TT"));
    }

    #[test]
    fn suited_plus() {
        let r = parse("A2s+").unwrap();
        assert_eq!(r.len(), 12);
        assert!(has(&r, "AKs") && has(&r, "A2s") && !has(&r, "AKo"));
    }

    #[test]
    fn offsuit_plus() {
        let r = parse("KTo+").unwrap();
        assert_eq!(r.len(), 3);
        assert!(has(&r, "KQo") && has(&r, "KTo") && !has(&r, "K9o"));
    }

    #[test]
    fn fixed_high_runs() {
        let r = parse("KTs-K8s").unwrap();
        assert_eq!(r.len(), 3);
        assert!(has(&r, "K9s") && !has(&r, "K7s"));
    }

    #[test]
    fn connector_runs() {
        let r = parse("T9s-65s").unwrap();
        assert_eq!(r.len(), 5);
        assert!(has(&r, "87s") && !has(&r, "54s"));
    }

    #[test]
    fn unions_dedup() {
        let r = parse("TT+ JJ+ AKs").unwrap();
        assert_eq!(r.len(), 6);
    }

    #[test]
    fn ranges_accept_either_order() {
        assert_eq!(parse("66-99").unwrap(), parse("99-66").unwrap());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse("XXs").is_err());
        assert!(parse("AKs-QQ").is_err());
        assert!(parse("T9s-K8s").is_err());
    }
}
